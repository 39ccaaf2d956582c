//! Flat JSON file storage
//!
//! All scenesync state lives in pretty-printed JSON files. Writes use a
//! 2-space indent and keep non-ASCII text as-is.

use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error};

/// Read and decode a JSON file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Read a JSON array, treating a missing or unusable file as empty
///
/// Anything other than a readable top-level array is logged and discarded.
pub fn read_json_list_lenient(path: &Path) -> Vec<Value> {
    match read_json::<Value>(path) {
        Ok(None) => {
            debug!(path = %path.display(), "No existing file");
            Vec::new()
        }
        Ok(Some(Value::Array(items))) => items,
        Ok(Some(_)) => {
            error!(path = %path.display(), "Failed to parse: top-level value is not an array");
            Vec::new()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to parse");
            Vec::new()
        }
    }
}

/// Write a value as pretty JSON, creating parent directories as needed
pub fn write_json_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
