use crate::artifacts::ignore::pattern::{IgnoreRule, IgnoreRules, parse_ignore_lines};
use crate::artifacts::snapshot::to_slash_path;
use std::path::Path;
use walkdir::WalkDir;

pub const IGNORE_FILE_NAME: &str = ".gitignore";
pub const METADATA_DIR_NAME: &str = ".git";

/// Gather the rules of every ignore file under `root`
///
/// Directories are visited depth-first in file name order; each rule is
/// scoped to the directory its ignore file lives in. The version-control
/// metadata directory is never entered. Unreadable directories and ignore
/// files are skipped.
pub fn collect_ignore_rules(root: &Path) -> IgnoreRules {
    let mut rules = IgnoreRules::default();

    let directories = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_metadata_dir(entry.file_name()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("skipping unreadable path while collecting ignore files: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir());

    for directory in directories {
        let ignore_file = directory.path().join(IGNORE_FILE_NAME);
        if !ignore_file.is_file() {
            continue;
        }

        let content = match std::fs::read_to_string(&ignore_file) {
            Ok(content) => content,
            Err(err) => {
                log::debug!("skipping unreadable ignore file {ignore_file:?}: {err}");
                continue;
            }
        };

        let scope = directory
            .path()
            .strip_prefix(root)
            .map(to_slash_path)
            .unwrap_or_default();

        let before = rules.len();
        for line in parse_ignore_lines(&content) {
            rules.push(IgnoreRule::compile_scoped(line, &scope));
        }
        log::debug!(
            "collected {} rules from {ignore_file:?}",
            rules.len() - before
        );
    }

    rules
}

pub(crate) fn is_metadata_dir(name: &std::ffi::OsStr) -> bool {
    name == METADATA_DIR_NAME
}
