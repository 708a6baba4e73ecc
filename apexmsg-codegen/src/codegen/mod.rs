//! Code generation module

mod class_generator;
mod code_generator;
mod field_table;
mod naming;
mod type_resolver;

pub use class_generator::*;
pub use code_generator::*;
pub use field_table::*;
pub use naming::*;
pub use type_resolver::*;
