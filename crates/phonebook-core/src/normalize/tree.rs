use std::collections::BTreeSet;

use crate::domain::{Node, Record};

pub const NUMBER_SEPARATOR: &str = " / ";
const PATH_SEPARATOR: &str = " ";

/// Keys that shape the flattened place names.
///
/// `skipped_keys` are still descended into but never appear in a place.
/// The `metadata_key` entry is not a contact and is not descended into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    pub skipped_keys: BTreeSet<String>,
    pub metadata_key: String,
}

impl TreeOptions {
    pub fn new<I, S>(skipped_keys: I, metadata_key: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skipped_keys: skipped_keys.into_iter().map(Into::into).collect(),
            metadata_key: metadata_key.into(),
        }
    }

    pub fn is_skipped(&self, key: &str) -> bool {
        self.skipped_keys.contains(key)
    }

    pub fn is_metadata(&self, key: &str) -> bool {
        key == self.metadata_key
    }
}

/// Flattens a tree depth-first into one record per non-empty leaf.
pub fn flatten_tree(root: &Node, options: &TreeOptions) -> Vec<Record> {
    let mut records = Vec::new();
    let mut path = Vec::new();
    walk(root, options, &mut path, &mut records);
    records
}

fn walk<'a>(
    node: &'a Node,
    options: &TreeOptions,
    path: &mut Vec<&'a str>,
    records: &mut Vec<Record>,
) {
    match node {
        Node::Leaf(values) => {
            if let Some(record) = leaf_record(path, values) {
                records.push(record);
            }
        }
        Node::Sequence(items) => {
            for item in items {
                walk(item, options, path, records);
            }
        }
        Node::Branch(entries) => {
            for (key, value) in entries {
                if options.is_metadata(key) {
                    continue;
                }
                if options.is_skipped(key) {
                    walk(value, options, path, records);
                } else {
                    path.push(key);
                    walk(value, options, path, records);
                    path.pop();
                }
            }
        }
        Node::Text(_) | Node::Scalar => {}
    }
}

fn leaf_record(path: &[&str], values: &[String]) -> Option<Record> {
    let numbers: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .collect();
    if numbers.is_empty() {
        return None;
    }

    let place = collapse_adjacent(path).join(PATH_SEPARATOR);
    Some(Record::new(place.trim(), numbers.join(NUMBER_SEPARATOR)))
}

/// Collapses runs of identical neighbouring segments; repeats that are not
/// adjacent are kept.
pub fn collapse_adjacent<'a>(path: &[&'a str]) -> Vec<&'a str> {
    let mut segments = path.to_vec();
    segments.dedup();
    segments
}
