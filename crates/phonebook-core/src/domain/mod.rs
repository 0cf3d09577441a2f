pub mod node;
pub mod record;

pub use node::Node;
pub use record::Record;
