use crate::artifacts::compare::record::{ComparisonRecord, Status};
use crate::artifacts::snapshot::{Entry, EntryKind, Snapshot};
use std::collections::{BTreeSet, HashSet};

/// A record whose status may still await its descendants
#[derive(Debug)]
struct Draft<'p> {
    path: &'p str,
    kind: EntryKind,
    in_a: bool,
    in_b: bool,
    status: Option<Status>,
}

impl<'p> Draft<'p> {
    fn classify(path: &'p str, a: Option<&Entry>, b: Option<&Entry>) -> Option<Self> {
        let (kind, status) = match (a, b) {
            (Some(a), None) => (a.kind(), Some(Status::OnlyA)),
            (None, Some(b)) => (b.kind(), Some(Status::OnlyB)),
            (Some(a), Some(b)) if a.kind() != b.kind() => (a.kind(), Some(Status::Different)),
            (Some(a), Some(_)) if a.is_dir() => (EntryKind::Directory, None),
            (Some(a), Some(b)) if a.same_content(b) => (EntryKind::File, Some(Status::Match)),
            (Some(_), Some(_)) => (EntryKind::File, Some(Status::Different)),
            (None, None) => return None,
        };

        Some(Draft {
            path,
            kind,
            in_a: a.is_some(),
            in_b: b.is_some(),
            status,
        })
    }

    fn into_record(self) -> ComparisonRecord {
        ComparisonRecord {
            path: self.path.to_string(),
            kind: self.kind,
            status: self.status.unwrap_or(Status::Match),
            in_a: self.in_a,
            in_b: self.in_b,
        }
    }
}

/// Classify every path of the union of both snapshots
///
/// Files and one-sided paths are classified directly. Directories present on
/// both sides are resolved afterwards from their descendants: visiting paths
/// in descending order guarantees every descendant is final before its
/// ancestor, and any non-matching descendant marks all of its ancestors.
/// Records are returned in ascending path order.
pub fn compare_trees(a: &Snapshot, b: &Snapshot) -> Vec<ComparisonRecord> {
    let universe = a
        .paths()
        .chain(b.paths())
        .map(String::as_str)
        .collect::<BTreeSet<_>>();

    let mut drafts = universe
        .into_iter()
        .rev()
        .filter_map(|path| Draft::classify(path, a.get(path), b.get(path)))
        .collect::<Vec<_>>();

    let mut unsettled_ancestors = HashSet::<&str>::new();

    for draft in drafts.iter_mut() {
        let status = match draft.status {
            Some(status) => status,
            None => {
                let resolved = if unsettled_ancestors.contains(draft.path) {
                    Status::Different
                } else {
                    Status::Match
                };
                draft.status = Some(resolved);
                resolved
            }
        };

        if status != Status::Match {
            mark_ancestors(draft.path, &mut unsettled_ancestors);
        }
    }

    drafts.reverse();
    drafts.into_iter().map(Draft::into_record).collect()
}

fn mark_ancestors<'p>(path: &'p str, marked: &mut HashSet<&'p str>) {
    let mut current = path;
    while let Some(separator) = current.rfind('/') {
        current = &current[..separator];
        // ancestors of an already marked directory are marked as well
        if !marked.insert(current) {
            break;
        }
    }
}
