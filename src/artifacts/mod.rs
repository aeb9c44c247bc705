//! Comparison data structures and algorithms
//!
//! - `core`: shared options and output utilities (pager wrapper)
//! - `ignore`: gitignore-style pattern compiler and ignore-file collector
//! - `snapshot`: content-addressed flat index of one directory tree
//! - `compare`: two-phase tree comparator with bottom-up directory aggregation
//! - `diff`: LCS line diff, text decoding and the change navigator

pub mod compare;
pub mod core;
pub mod diff;
pub mod ignore;
pub mod snapshot;
