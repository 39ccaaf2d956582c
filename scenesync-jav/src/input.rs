//! Input loader
//!
//! Reads the request list (`video.json` by default): a JSON array of
//! objects carrying `slug` or `video_id` plus `scene_id`. Extra fields are
//! ignored. Bad descriptors are skipped with a warning; only a missing
//! file stops the run.

use crate::error::SyncError;
use crate::keys::record_key;
use crate::types::{RemoteId, RequestItem};
use scenesync_common::json_store::read_json_list_lenient;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Parsed request list
#[derive(Debug, Default)]
pub struct InputBatch {
    /// Number of descriptors in the file
    pub total: usize,
    /// Valid items, in file order
    pub items: Vec<RequestItem>,
    /// Descriptors that were rejected
    pub skipped: usize,
}

/// Load and validate the request list
pub fn load_requests(path: &Path) -> Result<InputBatch, SyncError> {
    if !path.is_file() {
        return Err(SyncError::InputMissing(path.to_path_buf()));
    }

    let descriptors = read_json_list_lenient(path);
    info!(
        count = descriptors.len(),
        "Loaded {} videos from '{}'",
        descriptors.len(),
        path.display()
    );

    Ok(parse_requests(&descriptors))
}

/// Validate descriptors, keeping file order
pub fn parse_requests(descriptors: &[Value]) -> InputBatch {
    let mut batch = InputBatch {
        total: descriptors.len(),
        ..InputBatch::default()
    };

    for descriptor in descriptors {
        match parse_descriptor(descriptor) {
            Some(item) => batch.items.push(item),
            None => {
                warn!(descriptor = %descriptor, "Skipping invalid descriptor");
                batch.skipped += 1;
            }
        }
    }

    batch
}

fn parse_descriptor(descriptor: &Value) -> Option<RequestItem> {
    let object = descriptor.as_object()?;
    let (key_field, raw_key, normalized_key) = record_key(object)?;
    let scene_id = object.get("scene_id").and_then(RemoteId::from_json)?;

    Some(RequestItem {
        raw_key,
        normalized_key,
        scene_id,
        key_field,
    })
}
