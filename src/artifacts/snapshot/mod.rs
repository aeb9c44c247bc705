//! Directory snapshots
//!
//! A snapshot is a flat, content-addressed index of one directory tree:
//! every non-ignored path below the root, keyed by its forward-slash
//! relative path. Snapshots are built once and read-only afterwards.
//!
//! - `digest`: SHA-1 content digests with an unreadable sentinel
//! - `entry`: per-path description (kind, size, digest)
//! - `snapshotter`: the recursive walk applying ignore rules

pub mod digest;
pub mod entry;
pub mod snapshotter;

use crate::artifacts::ignore::IgnoreRules;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Component, Path, PathBuf};

pub use digest::{ContentDigest, DigestId};
pub use entry::{Entry, EntryKind};
pub use snapshotter::Snapshotter;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    root: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl Snapshot {
    /// Walk `root` and index every path the rules do not exclude
    pub fn build(root: &Path, rules: &IgnoreRules, normalize_line_breaks: bool) -> Self {
        Snapshotter::new(root, rules, normalize_line_breaks).snapshot()
    }

    pub fn from_entries(root: impl Into<PathBuf>, entries: impl IntoIterator<Item = Entry>) -> Self {
        Snapshot {
            root: root.into(),
            entries: entries
                .into_iter()
                .map(|entry| (entry.path().to_string(), entry))
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn entries(&self) -> btree_map::Values<'_, String, Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        self.entries.insert(entry.path().to_string(), entry);
    }
}

/// Join the normal components of a relative path with `/`
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a user-supplied relative path (either separator) to snapshot form
pub fn normalize_relative_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
