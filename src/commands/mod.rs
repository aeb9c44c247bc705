//! Command implementations
//!
//! - `compare`: list every path of both trees with its status
//! - `diff`: line view of one file
//! - `check_ignore`: explain which rule decides a path
//!
//! `compare` and `diff` are `impl Session` blocks writing through the
//! session writer.

pub mod check_ignore;
pub mod compare;
pub mod diff;

pub use check_ignore::check_ignore;
pub use compare::OutputFormat;
