mod delimited;
mod tree;

use serde::{Deserialize, Serialize};

pub use delimited::{parse_delimited, FIELD_DELIMITER};
pub use tree::{collapse_adjacent, flatten_tree, TreeOptions, NUMBER_SEPARATOR};

/// Which normalizer a source text goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Delimited,
    Tree,
}

impl SourceFormat {
    /// Guesses the format from a path or URL: `.csv` and `.txt` are delimited,
    /// everything else is treated as a tree.
    pub fn infer(location: &str) -> Self {
        let trimmed = location.trim();
        let path = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or(trimmed)
            .to_ascii_lowercase();
        if path.ends_with(".csv") || path.ends_with(".txt") {
            SourceFormat::Delimited
        } else {
            SourceFormat::Tree
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Delimited => "delimited",
            SourceFormat::Tree => "tree",
        }
    }
}
