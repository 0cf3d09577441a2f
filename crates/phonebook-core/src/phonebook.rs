use crate::domain::Record;
use crate::error::{CoreError, Result};
use crate::export::to_delimited;
use crate::search;

/// The canonical record list for one session.
///
/// Searches borrow the list; edits need `&mut self`, so there is a single
/// writer at any time. Reloads build a whole new list and swap it in with
/// [`PhoneBook::replace_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneBook {
    records: Vec<Record>,
}

impl PhoneBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Swaps in a freshly loaded list and returns the previous one.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Vec<Record> {
        std::mem::replace(&mut self.records, records)
    }

    pub fn search(&self, query: &str) -> Vec<&Record> {
        search::search(&self.records, query)
    }

    pub fn search_positions(&self, query: &str) -> Vec<usize> {
        search::search_positions(&self.records, query)
    }

    /// Overwrites the record at `index` with trimmed fields and returns the old
    /// value.
    pub fn replace(&mut self, index: usize, record: Record) -> Result<Record> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, record.trim()))
    }

    /// Appends a trimmed record and returns its index. Records with neither a
    /// place nor a number are rejected.
    pub fn append(&mut self, record: Record) -> Result<usize> {
        if record.is_blank() {
            return Err(CoreError::BlankRecord);
        }
        self.records.push(record.trim());
        Ok(self.records.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn to_delimited(&self, header: &str) -> String {
        to_delimited(&self.records, header)
    }
}
