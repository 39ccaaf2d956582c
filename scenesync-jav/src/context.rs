//! Per-run accumulator for side-table entities
//!
//! Created at the start of a run, filled by the extractor, and drained by the
//! writer. Both tables are first-seen-wins and iterate in ascending id order.

use crate::types::{Performer, RemoteId, Site};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct RunContext {
    performers: BTreeMap<RemoteId, Performer>,
    sites: BTreeMap<RemoteId, Site>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a performer unless the id is already known
    ///
    /// Returns `true` when the entry was added.
    pub fn register_performer(&mut self, performer: Performer) -> bool {
        match self.performers.entry(performer.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(performer);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Register a site unless the id is already known
    pub fn register_site(&mut self, site: Site) -> bool {
        match self.sites.entry(site.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(site);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Performers sorted ascending by id
    pub fn performers(&self) -> Vec<&Performer> {
        self.performers.values().collect()
    }

    /// Sites sorted ascending by id
    pub fn sites(&self) -> Vec<&Site> {
        self.sites.values().collect()
    }
}
