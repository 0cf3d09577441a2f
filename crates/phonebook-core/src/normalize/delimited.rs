use crate::domain::Record;

pub const FIELD_DELIMITER: char = ',';

/// Parses `place,number` lines after a header line.
///
/// Fields are split on every comma with no quoting support, so a comma inside
/// a place name shifts the remaining columns.
pub fn parse_delimited(text: &str) -> Vec<Record> {
    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Record {
    let mut fields = line.split(FIELD_DELIMITER);
    let place = fields.next().unwrap_or_default();
    let number = fields.next().unwrap_or_default();
    Record::trimmed(place, number)
}
