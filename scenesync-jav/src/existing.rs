//! Existing-result loader
//!
//! Prior output is kept verbatim and in order; it is only ever appended to.
//! A corrupt file is logged and treated as empty rather than stopping the run.

use crate::keys::record_key;
use scenesync_common::json_store::read_json_list_lenient;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Previously saved scene records, indexed by normalized key
#[derive(Debug, Default)]
pub struct ExistingResults {
    records: Vec<Value>,
    index: HashMap<String, usize>,
}

impl ExistingResults {
    /// Read the results file; missing or malformed files give an empty set
    pub fn load(path: &Path) -> Self {
        let existing = Self::from_records(read_json_list_lenient(path));
        debug!(
            path = %path.display(),
            records = existing.len(),
            indexed = existing.index.len(),
            "Existing results loaded"
        );
        existing
    }

    /// Index records by the normalized `slug`/`video_id`
    ///
    /// Records without a usable key are kept but cannot match anything.
    /// When two records share a key the first one is indexed.
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut index = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            let Some((_, _, key)) = record.as_object().and_then(record_key) else {
                continue;
            };
            index.entry(key).or_insert(position);
        }
        Self { records, index }
    }

    pub fn contains(&self, normalized_key: &str) -> bool {
        self.index.contains_key(normalized_key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand back the prior records for merging
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}
