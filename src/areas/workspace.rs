use crate::artifacts::diff::decode_text;
use crate::artifacts::ignore::{IgnoreRules, collect_ignore_rules};
use crate::artifacts::snapshot::Snapshot;
use anyhow::Context;
use std::path::Path;

/// One of the two compared roots
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a file addressed by its snapshot path
    pub fn read_file(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        let file_path = self.path.join(relative_path);

        std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    pub fn read_text(&self, relative_path: &str, normalize_line_breaks: bool) -> anyhow::Result<String> {
        let data = self.read_file(relative_path)?;

        decode_text(&data, normalize_line_breaks)
            .with_context(|| format!("Unable to decode {relative_path}"))
    }

    pub fn ignore_rules(&self) -> IgnoreRules {
        collect_ignore_rules(&self.path)
    }

    pub fn snapshot(&self, rules: &IgnoreRules, normalize_line_breaks: bool) -> Snapshot {
        Snapshot::build(&self.path, rules, normalize_line_breaks)
    }
}
