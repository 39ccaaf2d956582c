//! Run-level error types for scenesync-jav
//!
//! Per-item fetch failures are not errors at this level; they are recorded
//! as failed entries. Only conditions that stop the whole run live here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Request list does not exist
    #[error("Missing '{}'. Create it with slug/scene_id pairs.", .0.display())]
    InputMissing(PathBuf),

    /// An output file could not be written
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: scenesync_common::Error,
    },

    /// HTTP client could not be built (bad header value, TLS init)
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}
