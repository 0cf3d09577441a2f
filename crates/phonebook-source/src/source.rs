use std::fmt;
use std::path::PathBuf;

use crate::file::FileSource;
use crate::http::HttpSource;
use crate::{Result, SourceError};

pub trait TextSource {
    fn source_name(&self) -> &'static str;
    fn fetch_text(&self) -> Result<String>;
}

/// Where a phonebook is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SourceError::InvalidLocation(
                "source location cannot be empty".to_string(),
            ));
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(SourceLocation::Url(trimmed.to_string()));
        }
        Ok(SourceLocation::File(PathBuf::from(trimmed)))
    }

    pub fn open(&self) -> Box<dyn TextSource> {
        match self {
            SourceLocation::File(path) => Box::new(FileSource::new(path.clone())),
            SourceLocation::Url(url) => Box::new(HttpSource::new(url.clone(), None)),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => f.write_str(url),
        }
    }
}
