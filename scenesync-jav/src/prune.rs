//! Recursive removal of empty fields
//!
//! Mapping entries are dropped when the value is `""`, `[]`, or `{}`;
//! explicit nulls stay. Sequence elements are also dropped when null.
//! Children are pruned first, so a mapping that only held empty values is
//! itself empty and disappears from its parent.

use serde_json::Value;

/// Drop empty mapping entries and empty sequence elements, bottom-up
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, prune(v)))
                .filter(|(_, v)| !is_empty(v))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(prune)
                .filter(|v| !v.is_null() && !is_empty(v))
                .collect(),
        ),
        other => other,
    }
}

/// Empty string, empty sequence, or empty mapping
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}
