use crate::common::file::{FileSpec, write_file, write_mirrored};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Empty roots `a/` and `b/` under one temp dir
#[fixture]
pub fn compare_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    crate::common::file::create_directory(&dir.path().join("a"));
    crate::common::file::create_directory(&dir.path().join("b"));
    dir
}

/// Roots covering every status:
///
/// - `x.txt` differs
/// - `docs/` only exists in A, `new.txt` only in B
/// - `build/out.log` differs but is ignored by the shared `.gitignore`
#[fixture]
pub fn populated_compare_dir(compare_dir: TempDir) -> TempDir {
    let a = compare_dir.path().join("a");
    let b = compare_dir.path().join("b");
    let roots = [a.as_path(), b.as_path()];

    write_mirrored(&roots, ".gitignore", "*.log\n");
    write_mirrored(&roots, "same.txt", "same\n");
    write_mirrored(&roots, "sub/keep.txt", "keep\n");

    write_file(FileSpec::new(a.join("x.txt"), "a\nb\n".to_string()));
    write_file(FileSpec::new(b.join("x.txt"), "a\nc\n".to_string()));
    write_file(FileSpec::new(a.join("build").join("out.log"), "log".to_string()));
    write_file(FileSpec::new(b.join("build").join("out.log"), "other".to_string()));
    write_file(FileSpec::new(a.join("docs").join("guide.md"), "# Guide\n".to_string()));
    write_file(FileSpec::new(b.join("new.txt"), "new\n".to_string()));

    compare_dir
}

pub fn run_treecmp_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("treecmp").expect("Failed to find treecmp binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_treecmp_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
