//! Describe document parser module using serde_json

mod describe_parser;
mod metadata;

pub use describe_parser::*;
pub use metadata::*;
