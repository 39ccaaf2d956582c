//! Result merger and writer
//!
//! - results: prior records followed by this run's records, written only
//!   when something new was fetched
//! - performers / sites: this run's side tables, sorted by id, full overwrite
//! - failures: this run's failed entries, full overwrite
//!
//! Files with nothing to say are left untouched.

use crate::context::RunContext;
use crate::error::SyncError;
use crate::types::FailedEntry;
use scenesync_common::config::SyncConfig;
use scenesync_common::json_store::write_json_pretty;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a run produced
#[derive(Debug, Default)]
pub struct RunOutput {
    /// Records loaded from the results file
    pub existing: Vec<Value>,
    /// Records fetched this run, already pruned
    pub new_records: Vec<Value>,
    pub context: RunContext,
    pub failed: Vec<FailedEntry>,
}

/// Files written by [`write_outputs`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
}

/// Persist a run's output according to the write rules above
pub fn write_outputs(config: &SyncConfig, output: RunOutput) -> Result<WriteReport, SyncError> {
    let mut report = WriteReport::default();

    if !output.new_records.is_empty() {
        let mut merged = output.existing;
        merged.extend(output.new_records);
        write_file(&merged, &config.output_file, &mut report)?;
        info!(
            total = merged.len(),
            "Updated '{}'",
            config.output_file.display()
        );
    }

    let performers = output.context.performers();
    if !performers.is_empty() {
        write_file(&performers, &config.performer_file, &mut report)?;
    }

    let sites = output.context.sites();
    if !sites.is_empty() {
        write_file(&sites, &config.site_file, &mut report)?;
    }

    if !output.failed.is_empty() {
        write_file(&output.failed, &config.failed_file, &mut report)?;
    }

    Ok(report)
}

fn write_file<T: Serialize + ?Sized>(
    value: &T,
    path: &Path,
    report: &mut WriteReport,
) -> Result<(), SyncError> {
    write_json_pretty(value, path).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    report.written.push(path.to_path_buf());
    Ok(())
}
