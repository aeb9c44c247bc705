use crate::artifacts::compare::record::{ComparisonRecord, Status};
use colored::Colorize;
use serde::Serialize;

/// Counters over a comparison
///
/// One-sided and matching counts only include files; the different count
/// includes directories as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub only_a: usize,
    pub only_b: usize,
    pub different: usize,
    pub matching: usize,
}

impl Summary {
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        records
            .iter()
            .fold(Summary::default(), |mut summary, record| {
                match record.status {
                    Status::OnlyA if record.is_file() => summary.only_a += 1,
                    Status::OnlyB if record.is_file() => summary.only_b += 1,
                    Status::Match if record.is_file() => summary.matching += 1,
                    Status::Different => summary.different += 1,
                    _ => {}
                }
                summary
            })
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} only in A, {} only in B, {} different, {} match",
            self.only_a.to_string().red(),
            self.only_b.to_string().green(),
            self.different.to_string().yellow(),
            self.matching
        )
    }
}
