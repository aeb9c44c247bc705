use crate::areas::workspace::Workspace;
use crate::artifacts::compare::Comparison;
use crate::artifacts::core::CompareOptions;
use crate::artifacts::ignore::{IgnoreRules, compile_ignore_rules};
use crate::artifacts::snapshot::Snapshot;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;

/// Context of one comparison between two roots
///
/// Holds both workspaces, the options in effect and the output writer.
/// Commands are implemented as `impl Session` blocks.
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    workspace_a: Workspace,
    workspace_b: Workspace,
    options: CompareOptions,
}

impl Session {
    pub fn new(
        root_a: &Path,
        root_b: &Path,
        options: CompareOptions,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        Ok(Session {
            writer: RefCell::new(writer),
            workspace_a: Workspace::new(Self::resolve_root(root_a)?),
            workspace_b: Workspace::new(Self::resolve_root(root_b)?),
            options,
        })
    }

    fn resolve_root(root: &Path) -> anyhow::Result<Box<Path>> {
        let path = root
            .canonicalize()
            .with_context(|| format!("Cannot open directory {}", root.display()))?;

        if !path.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        Ok(path.into_boxed_path())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace_a(&self) -> &Workspace {
        &self.workspace_a
    }

    pub fn workspace_b(&self) -> &Workspace {
        &self.workspace_b
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Effective rule list: caller patterns first, then the ignore files of
    /// A and of B (when enabled). Rules from either root apply to both.
    pub fn ignore_rules(&self) -> IgnoreRules {
        let mut rules = compile_ignore_rules(&self.options.ignore_patterns);

        if self.options.use_gitignore {
            rules.extend(self.workspace_a.ignore_rules());
            rules.extend(self.workspace_b.ignore_rules());
        }

        log::debug!("{} ignore rules in effect", rules.len());
        rules
    }

    /// Snapshot both roots on blocking tasks
    pub async fn snapshots(&self) -> anyhow::Result<(Snapshot, Snapshot)> {
        let rules = Arc::new(self.ignore_rules());
        let normalize_line_breaks = self.options.ignore_line_breaks;

        let spawn_snapshot = |workspace: &Workspace| {
            let workspace = workspace.clone();
            let rules = Arc::clone(&rules);
            tokio::task::spawn_blocking(move || workspace.snapshot(&rules, normalize_line_breaks))
        };

        let (snapshot_a, snapshot_b) = tokio::try_join!(
            spawn_snapshot(&self.workspace_a),
            spawn_snapshot(&self.workspace_b)
        )
        .context("Snapshot task failed")?;

        log::info!(
            "snapshotted {} entries in A and {} entries in B",
            snapshot_a.len(),
            snapshot_b.len()
        );
        Ok((snapshot_a, snapshot_b))
    }

    pub async fn run_comparison(&self) -> anyhow::Result<Comparison> {
        let (snapshot_a, snapshot_b) = self.snapshots().await?;
        let comparison = Comparison::new(&snapshot_a, &snapshot_b);

        log::info!("compared {} paths", comparison.records().len());
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::compare::Status;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn roots() -> (TempDir, TempDir) {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();

        a.child("x.txt").write_str("a\nb\n").unwrap();
        b.child("x.txt").write_str("a\nc\n").unwrap();
        a.child("same.txt").write_str("same\r\n").unwrap();
        b.child("same.txt").write_str("same\n").unwrap();
        a.child("build.log").write_str("log").unwrap();
        a.child(".gitignore").write_str("*.log\n").unwrap();

        (a, b)
    }

    fn session(roots: &(TempDir, TempDir), options: CompareOptions) -> Session {
        Session::new(roots.0.path(), roots.1.path(), options, Box::new(std::io::sink())).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn comparison_applies_collected_rules(roots: (TempDir, TempDir)) {
        let session = session(&roots, CompareOptions::default());
        let comparison = session.run_comparison().await.unwrap();

        assert!(comparison.get("build.log").is_none());
        assert_eq!(comparison.get("x.txt").map(|r| r.status), Some(Status::Different));
        assert_eq!(comparison.get("same.txt").map(|r| r.status), Some(Status::Match));
    }

    #[rstest]
    #[tokio::test]
    async fn options_change_the_snapshots(roots: (TempDir, TempDir)) {
        let options = CompareOptions::new(false, false, vec!["x.txt".to_string()], false);
        let session = session(&roots, options);
        let comparison = session.run_comparison().await.unwrap();

        assert!(comparison.get("x.txt").is_none());
        assert_eq!(comparison.get("build.log").map(|r| r.status), Some(Status::OnlyA));
        assert_eq!(comparison.get("same.txt").map(|r| r.status), Some(Status::Different));
    }

    #[rstest]
    fn caller_patterns_precede_collected_rules(roots: (TempDir, TempDir)) {
        let options = CompareOptions::new(true, true, vec!["!keep.log".to_string()], false);
        let rules = session(&roots, options).ignore_rules();

        let patterns = rules.iter().map(|rule| rule.pattern()).collect::<Vec<_>>();
        assert_eq!(patterns, vec!["!keep.log", "*.log"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Session::new(
            &dir.path().join("absent"),
            dir.path(),
            CompareOptions::default(),
            Box::new(std::io::sink()),
        );

        assert!(result.is_err());
    }
}
