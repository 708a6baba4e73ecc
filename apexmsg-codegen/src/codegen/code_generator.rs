//! Main code generator orchestrator

use tracing::debug;

use crate::parser::ObjectDescribe;

use super::class_generator::{render_class, ClassSpec, RenderedClass};
use super::field_table::build_field_table;

/// Turns an object describe into a rendered Msg class
pub struct CodeGenerator<'a> {
    api_version: &'a str,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator targeting the given API version
    pub fn new(api_version: &'a str) -> Self {
        Self { api_version }
    }

    /// Build the class spec (filtered, transcoded, sorted field table)
    pub fn build_spec(&self, describe: &ObjectDescribe) -> ClassSpec {
        let fields = build_field_table(&describe.fields);
        debug!(
            "{}: kept {} of {} fields",
            describe.name,
            fields.len(),
            describe.fields.len()
        );
        ClassSpec::new(&describe.name, fields, self.api_version)
    }

    /// Build and render in one step
    pub fn generate(&self, describe: &ObjectDescribe) -> RenderedClass {
        render_class(&self.build_spec(describe))
    }
}
