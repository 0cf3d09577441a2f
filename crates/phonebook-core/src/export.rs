use crate::domain::Record;

pub const DEFAULT_HEADER: &str = "장소,내선번호";

/// Renders records as header plus `place,number` lines joined by `\n`.
///
/// Fields are written verbatim; a comma inside a field will not survive a
/// re-parse.
pub fn to_delimited(records: &[Record], header: &str) -> String {
    let body = records
        .iter()
        .map(|record| format!("{},{}", record.place, record.number))
        .collect::<Vec<_>>()
        .join("\n");
    let mut out = String::with_capacity(header.len() + 1 + body.len());
    out.push_str(header);
    out.push('\n');
    out.push_str(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::{to_delimited, DEFAULT_HEADER};
    use crate::domain::Record;
    use crate::normalize::parse_delimited;

    #[test]
    fn writes_header_then_rows() {
        let records = vec![Record::new("ICU", "1234"), Record::new("", "5678")];
        assert_eq!(
            to_delimited(&records, DEFAULT_HEADER),
            "장소,내선번호\nICU,1234\n,5678"
        );
    }

    #[test]
    fn empty_list_is_header_only() {
        assert_eq!(to_delimited(&[], "place,number"), "place,number\n");
    }

    #[test]
    fn export_then_parse_reproduces_records() {
        let records = vec![
            Record::new("ICU", "1234"),
            Record::new("", "5678"),
            Record::new("Radiology Reception", "2001 / 2002"),
            Record::new("Night desk", ""),
            Record::new("ICU", "1234"),
        ];
        assert_eq!(parse_delimited(&to_delimited(&records, DEFAULT_HEADER)), records);
    }
}
