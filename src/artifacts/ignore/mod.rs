//! Ignore rules
//!
//! - `pattern`: compiles one gitignore-style line into an [`IgnoreRule`] and
//!   evaluates ordered rule lists with last-match-wins semantics
//! - `collector`: gathers the rules of every ignore file under a root

pub mod collector;
pub mod pattern;

pub use collector::collect_ignore_rules;
pub use pattern::{IgnoreRule, IgnoreRules, RuleFlags, compile_ignore_rules, parse_ignore_lines};
