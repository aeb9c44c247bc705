use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::ignore::collector::is_metadata_dir;
use crate::artifacts::snapshot::{ContentDigest, Entry, Snapshot, to_slash_path};
use derive_new::new;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Recursive walker producing a [`Snapshot`] of one root
///
/// Every child path is evaluated against the whole rule list; excluded
/// directories are pruned without being entered. Unreadable directories are
/// skipped. Unreadable files and special files are still recorded, with an
/// unreadable digest.
#[derive(new)]
pub struct Snapshotter<'s> {
    root: &'s Path,
    rules: &'s IgnoreRules,
    normalize_line_breaks: bool,
}

impl Snapshotter<'_> {
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::from_entries(self.root, Vec::new());

        let walker = WalkDir::new(self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.is_included(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::debug!("skipping unreadable path under {:?}: {err}", self.root);
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            if let Some(entry) = self.describe(&entry) {
                snapshot.insert(entry);
            }
        }

        log::debug!(
            "snapshot of {:?} holds {} entries",
            self.root,
            snapshot.len()
        );

        snapshot
    }

    fn relative_path(&self, entry: &DirEntry) -> Option<String> {
        entry
            .path()
            .strip_prefix(self.root)
            .ok()
            .map(to_slash_path)
            .filter(|path| !path.is_empty())
    }

    fn is_included(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() && is_metadata_dir(entry.file_name()) {
            return false;
        }

        match self.relative_path(entry) {
            Some(path) => !self.rules.is_ignored(&path),
            None => false,
        }
    }

    fn describe(&self, entry: &DirEntry) -> Option<Entry> {
        let path = self.relative_path(entry)?;

        if entry.file_type().is_dir() {
            return Some(Entry::directory(path));
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                log::debug!("skipping {path}: cannot stat: {err}");
                return None;
            }
        };

        // fifos, sockets and devices could block or never end
        let digest = if entry.file_type().is_file() {
            ContentDigest::of_file(entry.path(), self.normalize_line_breaks)
        } else {
            log::debug!("not digesting special file {path}");
            ContentDigest::Unreadable
        };
        Some(Entry::file(path, metadata.len(), digest))
    }
}
