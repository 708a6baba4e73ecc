//! Naming utilities for code generation
//!
//! Turns raw sObject field names (`Package__Some_Field__c`, `GUID__c`, `SLAViolation`)
//! into camelCase Apex property names.

use crate::parser::is_record_id_name;

/// Suffix the platform appends to custom field names
const CUSTOM_FIELD_MARKER: &str = "__c";

/// Separator between a managed package namespace and the field name
const PACKAGE_DELIMITER: &str = "__";

/// Property name the record identifier is always mapped to
pub const RECORD_ID_PROPERTY: &str = "recordId";

/// Suffix appended to the object type name to form the class name
pub const CLASS_NAME_SUFFIX: &str = "Msg";

/// Transcode a raw field name into a camelCase property name.
///
/// The custom-field marker is removed (first occurrence, wherever it appears),
/// then everything up to and including the first `__` is dropped as a package
/// prefix. The remainder is split on `_` and each part is camel-cased:
///
/// - all-uppercase parts are lowercased entirely (`GUID` -> `guid`)
/// - parts opening with three or more capitals keep only the final capital
///   (`SLAViolation` -> `slaViolation`)
/// - anything else gets its first letter lowercased
///
/// Every part after the first then has its first letter uppercased.
pub fn transcode_field_name(raw: &str) -> String {
    let field = raw.replacen(CUSTOM_FIELD_MARKER, "", 1);
    let field = match field.find(PACKAGE_DELIMITER) {
        Some(pos) => &field[pos + PACKAGE_DELIMITER.len()..],
        None => field.as_str(),
    };

    let mut camel_case_name = String::with_capacity(field.len());
    for (index, part) in field.split('_').enumerate() {
        let part = if is_all_upper_case(part) {
            part.to_lowercase()
        } else {
            match starts_with_more_than_two_upper_case(part) {
                Some(last_upper) => multiple_upper_to_camel(part, last_upper),
                None => lower_first_letter(part),
            }
        };

        if index == 0 {
            camel_case_name.push_str(&part);
        } else {
            camel_case_name.push_str(&upper_first_letter(&part));
        }
    }

    camel_case_name
}

/// Property name for a raw field name, mapping the identifier field to `recordId`
pub fn to_pretty_name(raw: &str) -> String {
    if is_record_id_name(raw) {
        RECORD_ID_PROPERTY.to_string()
    } else {
        transcode_field_name(raw)
    }
}

/// Class name for an object type, e.g. "Account" -> "AccountMsg"
pub fn to_class_name(object_type: &str) -> String {
    upper_first_letter(&format!(
        "{}{}",
        transcode_field_name(object_type),
        CLASS_NAME_SUFFIX
    ))
}

/// Local variable name used for the source record in generated code
pub fn to_record_variable(object_type: &str) -> String {
    object_type
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

/// True if the string is unchanged by uppercasing.
///
/// Digits, symbols and the empty string count as uppercase.
pub fn is_all_upper_case(s: &str) -> bool {
    s == s.to_uppercase()
}

/// Check whether a string opens with more than two uppercase characters.
///
/// Returns the index just before the first non-uppercase character, i.e. the
/// position of the capital that starts the next word (`SLAViolation` -> 3).
/// The final character is never examined, so a run reaching the end of the
/// string yields `None`, as does a run of two or fewer capitals.
pub fn starts_with_more_than_two_upper_case(s: &str) -> Option<usize> {
    let chars: Vec<char> = s.chars().collect();
    if let Some(&first) = chars.first() {
        if !is_upper_char(first) {
            return None;
        }
    }

    let mut result = None;
    let mut upper_count = 1;
    for (i, &c) in chars
        .iter()
        .enumerate()
        .take(chars.len().saturating_sub(1))
        .skip(1)
    {
        if is_upper_char(c) {
            upper_count += 1;
        } else {
            result = Some(i - 1);
            break;
        }
    }

    if upper_count <= 2 {
        return None;
    }
    result
}

/// Lowercase every character before `last_upper_index`, keeping the rest verbatim.
///
/// `multiple_upper_to_camel("SLAViolation", 3)` -> `"slaViolation"`
pub fn multiple_upper_to_camel(s: &str, last_upper_index: usize) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, (byte_pos, c)) in s.char_indices().enumerate() {
        if i == last_upper_index {
            result.push_str(&s[byte_pos..]);
            break;
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Lowercase the first character of a string
pub fn lower_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character of a string
pub fn upper_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_upper_char(c: char) -> bool {
    c.to_uppercase().eq(std::iter::once(c))
}

/// Check if a name is an Apex reserved word (Apex identifiers are case-insensitive)
pub fn is_apex_reserved_word(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "abstract"
            | "activate"
            | "and"
            | "any"
            | "array"
            | "as"
            | "asc"
            | "autonomous"
            | "begin"
            | "bigdecimal"
            | "blob"
            | "boolean"
            | "break"
            | "bulk"
            | "by"
            | "byte"
            | "case"
            | "cast"
            | "catch"
            | "char"
            | "class"
            | "collect"
            | "commit"
            | "const"
            | "continue"
            | "currency"
            | "date"
            | "datetime"
            | "decimal"
            | "default"
            | "delete"
            | "desc"
            | "do"
            | "double"
            | "else"
            | "end"
            | "enum"
            | "exception"
            | "exit"
            | "export"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "from"
            | "global"
            | "goto"
            | "group"
            | "having"
            | "hint"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "inner"
            | "insert"
            | "instanceof"
            | "int"
            | "integer"
            | "interface"
            | "into"
            | "join"
            | "like"
            | "limit"
            | "list"
            | "long"
            | "loop"
            | "map"
            | "merge"
            | "new"
            | "not"
            | "null"
            | "nulls"
            | "number"
            | "object"
            | "of"
            | "on"
            | "or"
            | "outer"
            | "override"
            | "package"
            | "parallel"
            | "pragma"
            | "private"
            | "protected"
            | "public"
            | "retrieve"
            | "return"
            | "rollback"
            | "select"
            | "set"
            | "short"
            | "sobject"
            | "sort"
            | "static"
            | "string"
            | "super"
            | "switch"
            | "synchronized"
            | "system"
            | "testmethod"
            | "then"
            | "this"
            | "throw"
            | "time"
            | "transaction"
            | "trigger"
            | "true"
            | "try"
            | "undelete"
            | "update"
            | "upsert"
            | "using"
            | "virtual"
            | "void"
            | "webservice"
            | "when"
            | "where"
            | "while"
    )
}
