//! Field table builder - transcodes, filters and orders describe fields

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::parser::FieldDescriptor;

use super::naming::{is_apex_reserved_word, to_pretty_name};
use super::type_resolver::{ApexType, TypeResolver};

/// A field ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodedField {
    /// camelCase property name
    pub pretty_name: String,

    /// Original API name, used to read and write the source record
    pub raw_name: String,

    /// The describe entry this row came from
    pub metadata: FieldDescriptor,
}

impl TranscodedField {
    /// Build a row from a describe entry
    pub fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            pretty_name: to_pretty_name(&field.name),
            raw_name: field.name.clone(),
            metadata: field.clone(),
        }
    }

    /// Apex type of the generated property
    pub fn apex_type(&self) -> ApexType {
        TypeResolver::resolve(&self.metadata)
    }

    /// Check if this row carries the record identifier
    pub fn is_record_id(&self) -> bool {
        self.metadata.is_record_id()
    }
}

/// Build the ordered field table for a class.
///
/// Fields the platform reports as not updateable are skipped, except the
/// identifier field. The result is sorted by pretty name (ordinal, stable).
/// Pretty-name collisions are reported but kept.
pub fn build_field_table(fields: &[FieldDescriptor]) -> Vec<TranscodedField> {
    let mut table: Vec<TranscodedField> = fields
        .iter()
        .filter(|field| {
            if field.is_read_only() && !field.is_record_id() {
                debug!("updateable == false on field {}, skipping", field.name);
                return false;
            }
            true
        })
        .map(TranscodedField::from_descriptor)
        .collect();

    table.sort_by(|a, b| a.pretty_name.cmp(&b.pretty_name));

    report_collisions(&table);
    for row in &table {
        if is_apex_reserved_word(&row.pretty_name) {
            warn!(
                "Property {} (from {}) is an Apex reserved word",
                row.pretty_name, row.raw_name
            );
        }
    }

    table
}

/// Warn about raw fields that transcode to the same property name
fn report_collisions(table: &[TranscodedField]) {
    let mut seen: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in table {
        seen.entry(row.pretty_name.as_str())
            .or_default()
            .push(row.raw_name.as_str());
    }

    let mut collisions: Vec<_> = seen.into_iter().filter(|(_, raw)| raw.len() > 1).collect();
    collisions.sort();
    for (pretty, raw) in collisions {
        warn!(
            "Fields {} all map to property {}; the generated class will not compile",
            raw.join(", "),
            pretty
        );
    }
}
