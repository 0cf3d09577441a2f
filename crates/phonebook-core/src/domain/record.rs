use serde::{Deserialize, Serialize};

/// One directory entry: a display label and the extension(s) reachable there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub place: String,
    pub number: String,
}

impl Record {
    pub fn new(place: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            number: number.into(),
        }
    }

    pub fn trimmed(place: &str, number: &str) -> Self {
        Self::new(place.trim(), number.trim())
    }

    pub fn trim(self) -> Self {
        Self::trimmed(&self.place, &self.number)
    }

    pub fn is_blank(&self) -> bool {
        self.place.trim().is_empty() && self.number.trim().is_empty()
    }
}
