//! Core types for the scene sync pipeline
//!
//! - `RemoteId`: ids as the catalog sends them (number or string)
//! - `RequestItem`: one validated line of the input file
//! - `SceneRecord`: the minimal stored shape of a fetched scene
//! - `Performer` / `Site`: side-table entities
//! - `FailedEntry`: an item that exhausted its retries

use crate::prune::prune;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier from the catalog API
///
/// Ordering puts numeric ids first (numeric order), then textual ids
/// (lexicographic), which is the order side-table files are written in.
/// Integers above `i64::MAX` are `Unsigned`; non-integer numbers keep
/// their decimal form as text. Text ids are trimmed on every read path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl RemoteId {
    /// Zero and blank strings do not identify anything
    pub fn is_blank(&self) -> bool {
        match self {
            RemoteId::Number(n) => *n == 0,
            RemoteId::Unsigned(n) => *n == 0,
            RemoteId::Text(s) => s.trim().is_empty(),
        }
    }

    /// Interpret a loose JSON value as an id, rejecting blank ones
    pub fn from_json(value: &Value) -> Option<Self> {
        Self::convert(value).filter(|id| !id.is_blank())
    }

    fn convert(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(RemoteId::Text(s.trim().to_string())),
            Value::Number(n) => Some(if let Some(i) = n.as_i64() {
                RemoteId::Number(i)
            } else if let Some(u) = n.as_u64() {
                RemoteId::Unsigned(u)
            } else {
                RemoteId::Text(n.to_string())
            }),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for RemoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::convert(&value).ok_or_else(|| {
            de::Error::invalid_type(de::Unexpected::Other(&value.to_string()), &"a string or number id")
        })
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Unsigned(n) => write!(f, "{}", n),
            RemoteId::Text(s) => f.write_str(s),
        }
    }
}

/// Which input field supplied an item's identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    Slug,
    VideoId,
}

impl KeyField {
    /// Lookup order: `slug` first, then `video_id`
    pub const ALL: [KeyField; 2] = [KeyField::Slug, KeyField::VideoId];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyField::Slug => "slug",
            KeyField::VideoId => "video_id",
        }
    }
}

/// Validated request for one scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestItem {
    /// Identifier as written in the input file
    pub raw_key: String,
    /// Lowercased, trimmed identifier used for dedup
    pub normalized_key: String,
    /// Remote lookup key
    pub scene_id: RemoteId,
    /// Field the identifier came from; reused as the output key
    pub key_field: KeyField,
}

/// Minimal stored scene
///
/// `data` holds the extracted fields; pruning happens in [`SceneRecord::into_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    pub key_field: KeyField,
    pub raw_key: String,
    pub data: Value,
}

impl SceneRecord {
    /// `{ <key_field>: raw_key, "data": {...} }` with empty fields pruned
    pub fn into_value(self) -> Value {
        let mut record = Map::new();
        record.insert(self.key_field.as_str().to_string(), Value::String(self.raw_key));
        record.insert("data".to_string(), self.data);
        prune(Value::Object(record))
    }
}

/// Performer side-table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Performer {
    #[serde(rename = "_id")]
    pub id: RemoteId,
    #[serde(skip_serializing_if = "is_empty_text")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "is_empty_text")]
    pub image: Option<String>,
}

impl Performer {
    pub fn new(id: RemoteId, name: Option<String>, image: Option<String>) -> Self {
        Self {
            id,
            name,
            image,
        }
    }
}

/// Site side-table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: RemoteId,
    #[serde(skip_serializing_if = "is_empty_text")]
    pub name: Option<String>,
}

impl Site {
    pub fn new(id: RemoteId, name: Option<String>) -> Self {
        Self {
            id,
            name,
        }
    }
}

/// Item that failed every attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedEntry {
    pub raw_key: String,
    #[serde(rename = "clean_key")]
    pub normalized_key: String,
    pub scene_id: RemoteId,
    pub error: String,
}

/// Empty strings are pruned from side-table entries; missing values stay as null
fn is_empty_text(value: &Option<String>) -> bool {
    value.as_deref() == Some("")
}
