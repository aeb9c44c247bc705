//! Tree comparison
//!
//! Two snapshots are merged into one ordered list of [`ComparisonRecord`]s:
//!
//! - `record`: per-path status (`only-a`, `only-b`, `match`, `different`)
//! - `tree_compare`: classification with bottom-up directory aggregation
//! - `summary`: counters shown above a listing

pub mod record;
pub mod summary;
pub mod tree_compare;

use serde::Serialize;

pub use record::{ComparisonRecord, Status};
pub use summary::Summary;
pub use tree_compare::compare_trees;

use crate::artifacts::snapshot::Snapshot;

/// Frozen result of one comparison run
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    summary: Summary,
    records: Vec<ComparisonRecord>,
}

impl Comparison {
    pub fn new(a: &Snapshot, b: &Snapshot) -> Self {
        Self::from_records(compare_trees(a, b))
    }

    pub fn from_records(records: Vec<ComparisonRecord>) -> Self {
        Comparison {
            summary: Summary::from_records(&records),
            records,
        }
    }

    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn get(&self, path: &str) -> Option<&ComparisonRecord> {
        self.records
            .binary_search_by(|record| record.path.as_str().cmp(path))
            .ok()
            .map(|index| &self.records[index])
    }

    /// Records to list, optionally leaving out matches
    pub fn visible(&self, hide_matches: bool) -> impl Iterator<Item = &ComparisonRecord> {
        self.records
            .iter()
            .filter(move |record| !hide_matches || record.status != Status::Match)
    }

    pub fn is_identical(&self) -> bool {
        self.records
            .iter()
            .all(|record| record.status == Status::Match)
    }
}
