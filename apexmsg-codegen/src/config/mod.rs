//! Configuration for apexmsg-codegen

pub mod defaults;
mod force;
mod settings;

pub use force::*;
pub use settings::*;
