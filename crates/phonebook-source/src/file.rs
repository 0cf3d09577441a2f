use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::source::TextSource;
use crate::{Result, SourceError};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TextSource for FileSource {
    fn source_name(&self) -> &'static str {
        "file"
    }

    fn fetch_text(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!(path = %self.path.display(), bytes = text.len(), "source file read");
                Ok(text)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(self.path.display().to_string()))
            }
            Err(err) => Err(SourceError::Unavailable(format!(
                "{}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}
