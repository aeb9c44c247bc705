//! Directory tree comparison
//!
//! `treecmp` compares two directory trees path by path and, for files that
//! differ, produces an aligned line-level diff with change navigation.
//!
//! - `areas`: per-root workspaces and the comparison session context
//! - `artifacts`: ignore rules, snapshots, tree comparison and line diffing
//! - `commands`: user-facing command implementations

pub mod areas;
pub mod artifacts;
pub mod commands;
