//! Metadata structures for parsed sObject describe documents

use serde::{Deserialize, Serialize};

/// One entry of the describe-global `sobjects` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeSummary {
    /// API name of the object type
    pub name: String,

    /// Whether records of this type can be created
    #[serde(default)]
    pub createable: bool,

    /// Whether records of this type can be deleted
    #[serde(default)]
    pub deletable: bool,

    /// Whether records of this type can be updated
    #[serde(default)]
    pub updateable: bool,
}

/// Metadata for a single field of an object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Raw API name (e.g., "Package__Some_Field__c")
    pub name: String,

    /// Lowercase type tag (e.g., "boolean", "double", "reference")
    #[serde(rename = "type", default)]
    pub field_type: String,

    /// Whether the field is updateable; absent means unknown
    #[serde(default)]
    pub updateable: Option<bool>,

    /// Display label (if any)
    #[serde(default)]
    pub label: Option<String>,
}

/// Describe result for one object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescribe {
    /// API name of the object type
    pub name: String,

    /// Display label (if any)
    #[serde(default)]
    pub label: Option<String>,

    /// Fields in the order the platform returned them
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectTypeSummary {
    /// Whether the object type can be modified in any way.
    /// Only these are offered for generation.
    pub fn is_modifiable(&self) -> bool {
        self.createable || self.deletable || self.updateable
    }
}

impl FieldDescriptor {
    /// Create a descriptor with the given name, type tag and updateable flag
    pub fn new(name: &str, field_type: &str, updateable: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            updateable,
            label: None,
        }
    }

    /// Check if this is the record identifier field
    pub fn is_record_id(&self) -> bool {
        is_record_id_name(&self.name)
    }

    /// Check if the platform explicitly reports the field as read-only
    pub fn is_read_only(&self) -> bool {
        self.updateable == Some(false)
    }
}

/// Whether a raw field name denotes the record identifier (`Id`, in any ASCII case)
pub fn is_record_id_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_record_id_name() {
        for name in ["Id", "ID", "iD", "id"] {
            assert!(is_record_id_name(name), "{}", name);
        }
        for name in ["Ids", "Id__c", "", "\u{130}d"] {
            assert!(!is_record_id_name(name), "{}", name);
        }
        assert!(FieldDescriptor::new("ID", "id", Some(true)).is_record_id());
    }
}
