//! Sync pipeline
//!
//! One pass, top to bottom:
//! load input -> load existing -> plan -> fetch + extract -> write.
//!
//! Requests are strictly sequential in input order. Nothing is written
//! until every planned item has been processed.

use crate::context::RunContext;
use crate::error::SyncError;
use crate::existing::ExistingResults;
use crate::extractor::extract_scene;
use crate::fetch::{fetch_with_retry, FetchOutcome, RetryPolicy, SceneSource, Sleeper};
use crate::input::load_requests;
use crate::planner::plan_fetches;
use crate::types::{FailedEntry, RequestItem};
use crate::writer::{write_outputs, RunOutput};
use scenesync_common::config::SyncConfig;
use std::path::PathBuf;
use tracing::{error, info};

/// Counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Descriptors in the input file
    pub loaded: usize,
    /// Descriptors rejected as invalid
    pub skipped: usize,
    /// Items that needed fetching
    pub planned: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Files written this run
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    /// True when the run found nothing to fetch
    pub fn up_to_date(&self) -> bool {
        self.planned == 0
    }
}

/// Run one incremental sync
pub async fn run_sync<S, Z>(
    config: &SyncConfig,
    source: &S,
    sleeper: &Z,
) -> Result<RunSummary, SyncError>
where
    S: SceneSource + ?Sized,
    Z: Sleeper + ?Sized,
{
    let batch = load_requests(&config.input_file)?;
    let existing = ExistingResults::load(&config.output_file);
    let queue = plan_fetches(batch.items, &existing);

    let mut summary = RunSummary {
        loaded: batch.total,
        skipped: batch.skipped,
        planned: queue.len(),
        ..RunSummary::default()
    };

    if queue.is_empty() {
        info!("All scenes up to date.");
        return Ok(summary);
    }

    info!("Fetching {} new scenes via /jav/ endpoint...", queue.len());

    let policy = RetryPolicy::new(config.max_attempts(), config.retry_delay());
    let mut output = RunOutput {
        existing: existing.into_records(),
        context: RunContext::new(),
        ..RunOutput::default()
    };

    for (idx, item) in queue.iter().enumerate() {
        process_item(idx + 1, item, source, sleeper, &policy, &mut output).await;
        sleeper.sleep(policy.base_delay).await;
    }

    summary.succeeded = output.new_records.len();
    summary.failed = output.failed.len();
    summary.written = write_outputs(config, output)?.written;

    info!(
        "Done: {} success, {} failed",
        summary.succeeded, summary.failed
    );
    Ok(summary)
}

async fn process_item<S, Z>(
    position: usize,
    item: &RequestItem,
    source: &S,
    sleeper: &Z,
    policy: &RetryPolicy,
    output: &mut RunOutput,
) where
    S: SceneSource + ?Sized,
    Z: Sleeper + ?Sized,
{
    info!("[{}] {} → {}", position, item.raw_key, item.scene_id);

    match fetch_with_retry(source, sleeper, policy, &item.scene_id).await {
        FetchOutcome::Success { attempts, scene } => {
            let record = extract_scene(item, scene, &mut output.context);
            output.new_records.push(record.into_value());
            info!(attempts, "[{}] {} OK", position, item.raw_key);
        }
        FetchOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            error!(attempts, "[{}] {} FAILED: {}", position, item.raw_key, last_error);
            output.failed.push(FailedEntry {
                raw_key: item.raw_key.clone(),
                normalized_key: item.normalized_key.clone(),
                scene_id: item.scene_id.clone(),
                error: last_error.to_string(),
            });
        }
    }
}
