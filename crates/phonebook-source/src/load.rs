use phonebook_core::domain::{Node, Record};
use phonebook_core::{flatten_tree, parse_delimited, SourceFormat, TreeOptions};
use tracing::debug;

use crate::export::BOM;
use crate::source::{SourceLocation, TextSource};
use crate::{Result, SourceError};

/// Records produced by one load, plus the tree's as-of date when it has one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub as_of: Option<String>,
}

pub fn parse_records(text: &str, format: SourceFormat, options: &TreeOptions) -> Result<Loaded> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    match format {
        SourceFormat::Delimited => Ok(Loaded {
            records: parse_delimited(text),
            as_of: None,
        }),
        SourceFormat::Tree => {
            if text.trim().is_empty() {
                return Ok(Loaded::default());
            }
            let root: Node = serde_json::from_str(text).map_err(|err| SourceError::Parse {
                format: format.as_str(),
                message: err.to_string(),
            })?;
            Ok(Loaded {
                records: flatten_tree(&root, options),
                as_of: as_of_date(&root, options),
            })
        }
    }
}

fn as_of_date(root: &Node, options: &TreeOptions) -> Option<String> {
    root.get(&options.metadata_key)
        .and_then(Node::as_text)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn load(source: &dyn TextSource, format: SourceFormat, options: &TreeOptions) -> Result<Loaded> {
    let text = source.fetch_text()?;
    let loaded = parse_records(&text, format, options)?;
    debug!(
        source = source.source_name(),
        format = format.as_str(),
        records = loaded.records.len(),
        "phonebook loaded"
    );
    Ok(loaded)
}

pub fn load_location(
    location: &SourceLocation,
    format: SourceFormat,
    options: &TreeOptions,
) -> Result<Loaded> {
    let source = location.open();
    load(source.as_ref(), format, options)
}

#[cfg(test)]
mod tests {
    use super::{load, parse_records};
    use crate::source::TextSource;
    use crate::{Result, SourceError};
    use phonebook_core::domain::Record;
    use phonebook_core::{SourceFormat, TreeOptions};

    struct Fixed(&'static str);

    impl TextSource for Fixed {
        fn source_name(&self) -> &'static str {
            "fixed"
        }

        fn fetch_text(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    impl TextSource for Down {
        fn source_name(&self) -> &'static str {
            "down"
        }

        fn fetch_text(&self) -> Result<String> {
            Err(SourceError::Unavailable("status 503".to_string()))
        }
    }

    fn options() -> TreeOptions {
        TreeOptions::new(["진료과"], "기준일")
    }

    #[test]
    fn delimited_text_with_bom() {
        let loaded = parse_records(
            "\u{feff}장소,내선번호\nICU,1234\n",
            SourceFormat::Delimited,
            &options(),
        )
        .expect("parse");
        assert_eq!(loaded.records, vec![Record::new("ICU", "1234")]);
        assert!(loaded.as_of.is_none());
    }

    #[test]
    fn tree_text_reports_as_of_date() {
        let loaded = parse_records(
            r#"{"기준일": " 2024-03-01 ", "진료과": {"내과": ["2345", "2346"]}}"#,
            SourceFormat::Tree,
            &options(),
        )
        .expect("parse");
        assert_eq!(loaded.records, vec![Record::new("내과", "2345 / 2346")]);
        assert_eq!(loaded.as_of.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn empty_tree_text_is_an_empty_list() {
        let loaded = parse_records("  \n", SourceFormat::Tree, &options()).expect("parse");
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_records("{not json", SourceFormat::Tree, &options()).unwrap_err();
        assert!(matches!(err, SourceError::Parse { format: "tree", .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn load_runs_the_normalizer_on_fetched_text() {
        let loaded = load(
            &Fixed("place,number\nLab,5555\n"),
            SourceFormat::Delimited,
            &options(),
        )
        .expect("load");
        assert_eq!(loaded.records, vec![Record::new("Lab", "5555")]);
    }

    #[test]
    fn fetch_failures_are_surfaced() {
        let err = load(&Down, SourceFormat::Tree, &options()).unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("503"));
    }
}
