//! sObject field type to Apex type mapping

use crate::parser::FieldDescriptor;

/// Represents an Apex property type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApexType {
    Boolean,
    Double,
    /// Fallback for every other type tag (dates, ids, references, picklists, ...)
    String,
}

impl ApexType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> &'static str {
        match self {
            ApexType::Boolean => "Boolean",
            ApexType::Double => "Double",
            ApexType::String => "String",
        }
    }
}

impl std::fmt::Display for ApexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_type_string())
    }
}

/// Resolve sObject type tags to Apex types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the Apex type for a field
    pub fn resolve(field: &FieldDescriptor) -> ApexType {
        Self::resolve_tag(&field.field_type)
    }

    /// Get the Apex type for a raw type tag (case-insensitive, never fails)
    pub fn resolve_tag(type_tag: &str) -> ApexType {
        match type_tag.to_lowercase().as_str() {
            "boolean" => ApexType::Boolean,
            "double" => ApexType::Double,
            _ => ApexType::String,
        }
    }
}

/// Transcode a raw type tag into the Apex type name
pub fn transcode_data_type(type_tag: &str) -> String {
    TypeResolver::resolve_tag(type_tag).to_type_string().to_string()
}
