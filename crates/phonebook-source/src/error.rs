use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source not found: {0}")]
    NotFound(String),
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid source location: {0}")]
    InvalidLocation(String),
    #[error("failed to parse {format} source: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl SourceError {
    /// Whether the source could not be retrieved at all, as opposed to being
    /// retrieved and failing to parse.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            SourceError::NotFound(_) | SourceError::Unavailable(_) | SourceError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
