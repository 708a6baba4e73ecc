//! Describe document parser
//!
//! Accepts the raw REST describe responses as well as the `{"status": 0, "result": {...}}`
//! envelope produced by the `sf` command line when run with `--json`.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::metadata::{ObjectDescribe, ObjectTypeSummary};
use crate::error::{CodegenError, Result};

#[derive(Debug, Deserialize)]
struct GlobalDescribe {
    #[serde(default)]
    sobjects: Vec<ObjectTypeSummary>,
}

/// Parse a describe-global document into the list of object types
pub fn parse_global_describe(json: &str) -> Result<Vec<ObjectTypeSummary>> {
    let value = unwrap_envelope(serde_json::from_str(json)?);
    if !value.is_object() {
        return Err(CodegenError::ParseError(
            "describe-global document must be a JSON object".into(),
        ));
    }

    let global: GlobalDescribe = serde_json::from_value(value)?;
    debug!("Parsed {} object types", global.sobjects.len());
    Ok(global.sobjects)
}

/// Parse a single object describe document
pub fn parse_object_describe(json: &str) -> Result<ObjectDescribe> {
    let value = unwrap_envelope(serde_json::from_str(json)?);
    let describe: ObjectDescribe = serde_json::from_value(value)?;

    if describe.name.trim().is_empty() {
        return Err(CodegenError::ParseError(
            "object describe has an empty name".into(),
        ));
    }
    if let Some(field) = describe.fields.iter().find(|f| f.name.is_empty()) {
        return Err(CodegenError::ParseError(format!(
            "object {} has a field with an empty name (type {})",
            describe.name, field.field_type
        )));
    }

    debug!(
        "Parsed describe for {} ({} fields)",
        describe.name,
        describe.fields.len()
    );
    Ok(describe)
}

/// Strip the `sf --json` envelope if present
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("status") && map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}
