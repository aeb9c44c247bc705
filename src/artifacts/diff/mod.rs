//! Line diffing
//!
//! - `line_diff`: LCS alignment of two line sequences into [`DiffLine`]s
//! - `navigator`: cyclic cursor over the changed lines of one diff
//! - `text`: decoding file bytes into lines, rejecting binary content

pub mod line_diff;
pub mod navigator;
pub mod text;

pub use line_diff::{DiffAlgorithm, DiffLine, DiffLineKind, LcsDiff, diff_lines};
pub use navigator::ChangeNavigator;
pub use text::{TextError, decode_text, split_lines};
