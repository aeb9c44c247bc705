use crate::artifacts::core::CompareOptions;
use crate::artifacts::ignore::{collect_ignore_rules, compile_ignore_rules};
use crate::artifacts::snapshot::normalize_relative_path;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Print the paths that the effective rules of `root` ignore
///
/// A path below an excluded directory counts as ignored, as the snapshot
/// never reaches it. With `verbose`, each path is preceded by the deciding
/// rule (of the path or of its excluded ancestor) as `scope:pattern`.
/// Returns the number of ignored paths.
pub fn check_ignore(
    root: &Path,
    options: &CompareOptions,
    paths: &[String],
    verbose: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<usize> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Cannot open directory {}", root.display()))?;

    let mut rules = compile_ignore_rules(&options.ignore_patterns);
    if options.use_gitignore {
        rules.extend(collect_ignore_rules(&root));
    }

    let mut ignored = 0;
    for path in paths {
        let path = normalize_relative_path(path);
        let Some(rule) = rules
            .excluding_prefix(&path)
            .and_then(|prefix| rules.deciding_rule(prefix))
        else {
            continue;
        };

        ignored += 1;
        if verbose {
            writeln!(writer, "{rule}\t{path}")?;
        } else {
            writeln!(writer, "{path}")?;
        }
    }

    Ok(ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn run(root: &Path, options: &CompareOptions, paths: &[&str], verbose: bool) -> String {
        let paths = paths.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        let mut output = Vec::new();
        check_ignore(root, options, &paths, verbose, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn negated_rule_keeps_the_path() {
        let dir = TempDir::new().unwrap();
        dir.child(".gitignore").write_str("*.log\n!keep.log\n").unwrap();

        let output = run(dir.path(), &CompareOptions::default(), &["a.log", "keep.log", "a.txt"], false);

        assert_eq!(output, "a.log\n");
    }

    #[test]
    fn paths_under_an_excluded_directory_stay_ignored() {
        let dir = TempDir::new().unwrap();
        dir.child(".gitignore").write_str("build\n!build/app\n").unwrap();

        let output = run(dir.path(), &CompareOptions::default(), &["build/app", "src/app"], true);

        assert_eq!(output, "build\tbuild/app\n");
    }

    #[test]
    fn verbose_output_names_the_scope() {
        let dir = TempDir::new().unwrap();
        dir.child("sub").child(".gitignore").write_str("tmp/\n").unwrap();

        let output = run(dir.path(), &CompareOptions::default(), &["sub/tmp/x", "tmp/x"], true);

        assert_eq!(output, "sub:tmp/\tsub/tmp/x\n");
    }
}
