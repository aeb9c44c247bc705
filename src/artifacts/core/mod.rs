//! Core utilities and shared types
//!
//! - `options`: the recognized comparison options
//! - `output`: terminal output target (plain stdout or the minus pager)

pub mod options;
pub mod output;

pub use options::CompareOptions;
pub use output::Output;
