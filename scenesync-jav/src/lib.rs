//! scenesync-jav library interface
//!
//! Incrementally fetches scene metadata from the catalog `/jav/` endpoint
//! for a list of identifiers and merges it into local JSON files.

pub mod context;
pub mod error;
pub mod existing;
pub mod extractor;
pub mod fetch;
pub mod input;
pub mod keys;
pub mod planner;
pub mod prune;
pub mod types;
pub mod workflow;
pub mod writer;

pub use crate::error::SyncError;
pub use crate::workflow::{run_sync, RunSummary};
