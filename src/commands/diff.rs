use crate::areas::session::Session;
use crate::areas::workspace::Workspace;
use crate::artifacts::compare::Status;
use crate::artifacts::diff::{ChangeNavigator, DiffLine, DiffLineKind, diff_lines, split_lines};
use crate::artifacts::snapshot::normalize_relative_path;
use anyhow::Context;
use colored::Colorize;

const UNREADABLE_MESSAGE: &str = "Unable to read file (may be binary)";
const IDENTICAL_MESSAGE: &str = "Files are identical";

/// Which part of the aligned diff to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffView {
    Full,
    /// Window around the change reached after moving the given number of
    /// steps (negative: backward)
    Change { steps: isize, context: usize },
}

impl Session {
    pub async fn diff(&self, path: &str, view: DiffView) -> anyhow::Result<()> {
        let path = normalize_relative_path(path);
        let comparison = self.run_comparison().await?;

        let record = comparison
            .get(&path)
            .with_context(|| format!("Path not found in either tree: {path}"))?;
        if record.is_dir() {
            anyhow::bail!("{path} is a directory");
        }

        match record.status {
            Status::Match => {
                writeln!(self.writer(), "{IDENTICAL_MESSAGE}")?;
                Ok(())
            }
            Status::OnlyA => self.print_single_file("Only in A", self.workspace_a(), &path),
            Status::OnlyB => self.print_single_file("Only in B", self.workspace_b(), &path),
            Status::Different => self.print_file_diff(&path, view),
        }
    }

    fn print_single_file(&self, label: &str, workspace: &Workspace, path: &str) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("{label}: {path}").bold())?;

        let text = match workspace.read_text(path, self.options().ignore_line_breaks) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("{err:#}");
                writeln!(self.writer(), "{UNREADABLE_MESSAGE}")?;
                return Ok(());
            }
        };

        for (index, line) in split_lines(&text).into_iter().enumerate() {
            writeln!(self.writer(), "{:>4} {}", index + 1, line)?;
        }

        Ok(())
    }

    fn print_file_diff(&self, path: &str, view: DiffView) -> anyhow::Result<()> {
        let normalize = self.options().ignore_line_breaks;
        let texts = (
            self.workspace_a().read_text(path, normalize),
            self.workspace_b().read_text(path, normalize),
        );

        let (text_a, text_b) = match texts {
            (Ok(text_a), Ok(text_b)) => (text_a, text_b),
            (Err(err), _) | (_, Err(err)) => {
                log::debug!("{err:#}");
                writeln!(self.writer(), "{UNREADABLE_MESSAGE}")?;
                return Ok(());
            }
        };

        let lines = diff_lines(&split_lines(&text_a), &split_lines(&text_b));
        let mut navigator = ChangeNavigator::new(lines);

        writeln!(self.writer(), "{}", format!("--- a/{path}").bold())?;
        writeln!(self.writer(), "{}", format!("+++ b/{path}").bold())?;

        match view {
            DiffView::Full => {
                let count = navigator.change_count();
                let noun = if count == 1 { "change" } else { "changes" };
                writeln!(self.writer(), "{}", format!("{count} {noun}").cyan())?;

                for line in navigator.lines() {
                    self.print_diff_line(line)?;
                }
            }
            DiffView::Change { steps, context } => {
                navigator.advance(steps);
                let Some(position) = navigator.current_position() else {
                    writeln!(self.writer(), "{}", "0 changes".cyan())?;
                    return Ok(());
                };

                writeln!(
                    self.writer(),
                    "{}",
                    format!(
                        "change {} / {}",
                        navigator.current_index() + 1,
                        navigator.change_count()
                    )
                    .cyan()
                )?;

                let lines = navigator.lines();
                let start = position.saturating_sub(context);
                let end = (position + context + 1).min(lines.len());
                for line in &lines[start..end] {
                    self.print_diff_line(line)?;
                }
            }
        }

        Ok(())
    }

    fn print_diff_line(&self, line: &DiffLine) -> anyhow::Result<()> {
        let number = |n: Option<usize>| n.map(|n| n.to_string()).unwrap_or_default();
        let text = format!(
            "{:>4} {:>4} {}",
            number(line.line_a),
            number(line.line_b),
            line
        );

        let text = match line.kind {
            DiffLineKind::Same => text.normal(),
            DiffLineKind::Added => text.green(),
            DiffLineKind::Removed => text.red(),
        };
        writeln!(self.writer(), "{}", text)?;

        Ok(())
    }
}
