//! Identifier normalization
//!
//! The normalized key is the only notion of "already have this": the
//! existing-result index and the fetch planner both go through
//! [`record_key`], so case and whitespace variants collapse to one item.

use crate::types::KeyField;
use serde_json::{Map, Value};

/// Lowercase and trim an identifier; blank or absent yields `None`
pub fn normalize_key(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Text form of a loose JSON identifier (strings as-is, numbers in decimal)
pub fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifier of an input descriptor or stored record
///
/// Prefers `slug`, falls back to `video_id`. Returns the field used, the raw
/// text, and its normalized form.
pub fn record_key(object: &Map<String, Value>) -> Option<(KeyField, String, String)> {
    KeyField::ALL.iter().find_map(|field| {
        let raw = object.get(field.as_str()).and_then(key_text)?;
        let normalized = normalize_key(Some(&raw))?;
        Some((*field, raw, normalized))
    })
}
