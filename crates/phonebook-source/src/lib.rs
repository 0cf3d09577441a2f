pub mod error;
pub mod export;
pub mod file;
pub mod http;
pub mod load;
pub mod source;
pub mod staff;

pub use error::{Result, SourceError};
pub use export::write_export;
pub use load::{load, load_location, parse_records, Loaded};
pub use source::{SourceLocation, TextSource};
