use crate::domain::Record;

/// Lower-cased needle for a raw query, or `None` when the query is blank.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// `needle` must already be normalized.
pub fn matches(record: &Record, needle: &str) -> bool {
    record.place.to_lowercase().contains(needle) || record.number.to_lowercase().contains(needle)
}

/// Records whose place or number contains `query`, in input order.
///
/// A blank query selects every record.
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    match normalize_query(query) {
        None => records.iter().collect(),
        Some(needle) => records
            .iter()
            .filter(|record| matches(record, &needle))
            .collect(),
    }
}

/// Same selection as [`search`], reported as indexes into `records`.
pub fn search_positions(records: &[Record], query: &str) -> Vec<usize> {
    match normalize_query(query) {
        None => (0..records.len()).collect(),
        Some(needle) => records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(record, &needle))
            .map(|(index, _)| index)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_query, search, search_positions};
    use crate::domain::Record;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("ICU", "1234"),
            Record::new("", "5678"),
            Record::new("Radiology Reception", "2001 / 2002"),
            Record::new("icu family lounge", "3456"),
        ]
    }

    #[test]
    fn blank_query_is_identity() {
        let records = sample();
        let all: Vec<Record> = search(&records, "").into_iter().cloned().collect();
        assert_eq!(all, records);
        assert_eq!(search(&records, "   ").len(), records.len());
        assert_eq!(search_positions(&records, "\t"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn blank_query_returns_the_same_elements() {
        let records = sample();
        let hits = search(&records, "");
        for (hit, record) in hits.iter().zip(records.iter()) {
            assert!(std::ptr::eq(*hit, record));
        }
    }

    #[test]
    fn matching_is_case_insensitive_containment() {
        let records = vec![Record::new("ICU", "1234")];
        assert_eq!(search(&records, "icu"), vec![&records[0]]);
        assert!(search(&records, "xyz").is_empty());
    }

    #[test]
    fn number_matches_and_order_is_stable() {
        let records = sample();
        let hits: Vec<&str> = search(&records, "icu")
            .into_iter()
            .map(|record| record.place.as_str())
            .collect();
        assert_eq!(hits, vec!["ICU", "icu family lounge"]);
        assert_eq!(search_positions(&records, "56"), vec![1, 3]);
    }

    #[test]
    fn query_is_trimmed_and_lowercased() {
        assert_eq!(normalize_query("  RadIOLOGY "), Some("radiology".to_string()));
        assert_eq!(normalize_query(" \n"), None);
        let records = sample();
        assert_eq!(search_positions(&records, "  RECEPTION "), vec![2]);
    }

    #[test]
    fn separators_are_plain_text() {
        let records = sample();
        assert_eq!(search_positions(&records, "01 / 20"), vec![2]);
    }

    #[test]
    fn hangul_queries_match() {
        let records = vec![Record::new("내과 의국", "2345"), Record::new("외과", "3456")];
        assert_eq!(search_positions(&records, "내과"), vec![0]);
    }
}
