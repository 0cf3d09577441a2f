pub mod display;
pub mod domain;
pub mod error;
pub mod export;
pub mod normalize;
pub mod phonebook;
pub mod search;

pub use domain::*;
pub use error::CoreError;
pub use export::{to_delimited, DEFAULT_HEADER};
pub use normalize::{flatten_tree, parse_delimited, SourceFormat, TreeOptions};
pub use phonebook::PhoneBook;
pub use search::{search, search_positions};
