//! Diff planner: which requested items still need fetching

use crate::existing::ExistingResults;
use crate::types::RequestItem;
use std::collections::HashSet;
use tracing::debug;

/// Items whose normalized key is not in the existing results
///
/// Input order is kept. A key repeated within the input is planned once.
pub fn plan_fetches(items: Vec<RequestItem>, existing: &ExistingResults) -> Vec<RequestItem> {
    let mut planned = HashSet::new();

    items
        .into_iter()
        .filter(|item| {
            if existing.contains(&item.normalized_key) {
                debug!(key = %item.raw_key, "Already fetched");
                return false;
            }
            if !planned.insert(item.normalized_key.clone()) {
                debug!(key = %item.raw_key, "Duplicate in input, already planned");
                return false;
            }
            true
        })
        .collect()
}
