//! Type conformance for raw manifest documents.
//!
//! A field holding the wrong kind of value is recorded and removed before the
//! typed parse, so one bad field does not hide the rest of the manifest.

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::Collection;

/// String fields of a collection entry.
const ENTRY_STRING_FIELDS: &[&str] = &["id", "file", "name", "description", "agent", "event"];

/// A manifest value of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    /// Collection of the offending entry; `None` for top-level fields
    pub collection: Option<Collection>,
    /// Position of the offending entry
    pub index: Option<usize>,
    /// Offending field; `None` when the entry itself is not a mapping
    pub field: Option<String>,
    pub expected: &'static str,
    pub found: &'static str,
}

impl TypeMismatch {
    /// Dotted location such as `version`, `agents[0].id` or `skills[2]`.
    #[must_use]
    pub fn location(&self) -> String {
        match (self.collection, self.index, self.field.as_deref()) {
            (Some(c), Some(i), Some(field)) => format!("{c}[{i}].{field}"),
            (Some(c), Some(i), None) => format!("{c}[{i}]"),
            (_, _, Some(field)) => field.to_string(),
            _ => "manifest".to_string(),
        }
    }

    /// Whether this mismatch concerns the given entry.
    #[must_use]
    pub fn is_entry(&self, collection: Collection, index: usize) -> bool {
        self.collection == Some(collection) && self.index == Some(index)
    }
}

/// Strip mistyped values from a manifest mapping, returning what was removed
/// in document order: top-level fields first, then entries collection by
/// collection.
pub fn conform(root: &mut Map<String, Value>) -> Vec<TypeMismatch> {
    let mut mismatches = Vec::new();

    for field in ["name", "version", "description"] {
        if let Some(found) = take_mistyped(root, field, Value::is_string) {
            mismatches.push(top_level(field, "string", found));
        }
    }
    if let Some(found) = take_mistyped(root, "author", is_author) {
        mismatches.push(top_level("author", "string or object with a name", found));
    }
    if let Some(found) = take_mistyped(root, "keywords", is_string_array) {
        mismatches.push(top_level("keywords", "array of strings", found));
    }

    for collection in Collection::ALL {
        let key = collection.as_str();
        if let Some(found) = take_mistyped(root, key, Value::is_array) {
            mismatches.push(top_level(key, "array", found));
            continue;
        }
        let Some(Value::Array(entries)) = root.get_mut(key) else {
            continue;
        };
        for (index, entry) in entries.iter_mut().enumerate() {
            if let Value::Object(fields) = entry {
                for field in ENTRY_STRING_FIELDS {
                    if let Some(found) = take_mistyped(fields, field, Value::is_string) {
                        mismatches.push(TypeMismatch {
                            collection: Some(collection),
                            index: Some(index),
                            field: Some((*field).to_string()),
                            expected: "string",
                            found,
                        });
                    }
                }
            } else {
                mismatches.push(TypeMismatch {
                    collection: Some(collection),
                    index: Some(index),
                    field: None,
                    expected: "object",
                    found: kind(entry),
                });
                *entry = Value::Object(Map::new());
            }
        }
    }

    mismatches
}

fn top_level(field: &str, expected: &'static str, found: &'static str) -> TypeMismatch {
    TypeMismatch {
        collection: None,
        index: None,
        field: Some(field.to_string()),
        expected,
        found,
    }
}

/// Remove `key` when it holds a non-null value that fails `accepts`.
fn take_mistyped(
    map: &mut Map<String, Value>,
    key: &str,
    accepts: impl Fn(&Value) -> bool,
) -> Option<&'static str> {
    let value = map.get(key)?;
    if value.is_null() || accepts(value) {
        return None;
    }
    map.remove(key).map(|value| kind(&value))
}

fn is_author(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Object(fields) => {
            fields.get("name").is_some_and(Value::is_string)
                && ["email", "url"]
                    .iter()
                    .all(|key| fields.get(*key).is_none_or(|v| v.is_null() || v.is_string()))
        }
        _ => false,
    }
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
