use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("record index {index} out of range ({len} records)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("record has neither place nor number")]
    BlankRecord,
}

pub type Result<T> = std::result::Result<T, CoreError>;
