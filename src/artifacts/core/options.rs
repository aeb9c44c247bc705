use derive_new::new;

/// Recognized comparison options
///
/// `hide_matches` only affects listings; the other fields change what the
/// snapshots contain and how digests and diffs treat line breaks.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CompareOptions {
    /// Collapse CRLF/CR to LF before hashing and diffing
    pub ignore_line_breaks: bool,
    /// Collect `.gitignore` files from both roots
    pub use_gitignore: bool,
    /// Caller rules, evaluated before any collected rule
    pub ignore_patterns: Vec<String>,
    pub hide_matches: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            ignore_line_breaks: true,
            use_gitignore: true,
            ignore_patterns: Vec::new(),
            hide_matches: false,
        }
    }
}
