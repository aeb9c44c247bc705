//! Gitignore-style pattern compiler
//!
//! A rule line is compiled once into an [`IgnoreRule`] holding a matcher for
//! forward-slash normalized paths relative to the scanned root.
//!
//! ## Syntax
//!
//! - `!pattern`: negation, un-excludes a path excluded by an earlier rule
//! - `/pattern`: anchored to the directory the rule was declared in
//! - `pattern/`: directory marker (informational, recorded as a flag)
//! - `**`: zero or more path segments, `*`: within one segment, `?`: one
//!   non-separator character
//!
//! A match on a path also matches everything nested below it.

use bitflags::bitflags;
use regex::Regex;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RuleFlags: u8 {
        const NEGATED = 0b001;
        const ANCHORED = 0b010;
        const DIRECTORY_ONLY = 0b100;
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(Regex),
    // fallback for bodies the regex engine refuses
    Literal(String),
}

impl Matcher {
    fn is_match(&self, path: &str) -> bool {
        match self {
            Matcher::Glob(regex) => regex.is_match(path),
            Matcher::Literal(literal) => {
                !literal.is_empty()
                    && path
                        .strip_prefix(literal.as_str())
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            }
        }
    }
}

/// One compiled ignore rule
///
/// Immutable once compiled. The scope is the directory (relative to the
/// scanned root) whose ignore file declared the rule; rules with a non-empty
/// scope only apply to paths beneath it.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    scope: String,
    flags: RuleFlags,
    matcher: Matcher,
}

impl IgnoreRule {
    /// Compile a rule declared at the scanned root
    pub fn compile(line: &str) -> Self {
        Self::compile_scoped(line, "")
    }

    /// Compile a rule declared in the ignore file of `scope`
    ///
    /// The body is joined onto the scope, so a scoped rule never floats: `*.tmp`
    /// declared in `sub` only covers direct children matching `sub/*.tmp`.
    ///
    /// Never fails: a body the regex engine rejects degrades to a literal
    /// prefix matcher.
    pub fn compile_scoped(line: &str, scope: &str) -> Self {
        let pattern = line.trim().to_string();
        let scope = scope.trim_matches('/').replace('\\', "/");
        let mut flags = RuleFlags::empty();

        let mut body = pattern.as_str();
        if let Some(rest) = body.strip_prefix('!') {
            flags |= RuleFlags::NEGATED;
            body = rest;
        }

        let body = body.replace('\\', "/");
        let mut body = body.as_str();
        if let Some(rest) = body.strip_prefix('/') {
            flags |= RuleFlags::ANCHORED;
            body = rest;
        }
        if let Some(rest) = body.strip_suffix('/') {
            flags |= RuleFlags::DIRECTORY_ONLY;
            body = rest;
        }

        let matcher = Self::build_matcher(body, &scope, flags);

        IgnoreRule {
            pattern,
            scope,
            flags,
            matcher,
        }
    }

    fn build_matcher(body: &str, scope: &str, flags: RuleFlags) -> Matcher {
        if body.is_empty() {
            return Matcher::Literal(String::new());
        }

        // a scoped body is prefixed with its directory, so it always has a separator
        let floating =
            scope.is_empty() && !flags.contains(RuleFlags::ANCHORED) && !body.contains('/');

        let mut source = String::from("^");
        if !scope.is_empty() {
            source.push_str(&regex::escape(scope));
            source.push('/');
        }
        if floating {
            source.push_str("(?:.*/)?");
        }
        source.push_str(&glob_to_regex(body));
        source.push_str("(?:$|/.*)");

        match Regex::new(&source) {
            Ok(regex) => Matcher::Glob(regex),
            Err(err) => {
                log::debug!("ignore pattern {body:?} falls back to literal matching: {err}");
                let literal = if scope.is_empty() {
                    body.to_string()
                } else {
                    format!("{scope}/{body}")
                };
                Matcher::Literal(literal)
            }
        }
    }

    /// The rule line as written, flags included
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    pub fn is_negated(&self) -> bool {
        self.flags.contains(RuleFlags::NEGATED)
    }

    pub fn is_anchored(&self) -> bool {
        self.flags.contains(RuleFlags::ANCHORED)
    }

    pub fn is_directory_only(&self) -> bool {
        self.flags.contains(RuleFlags::DIRECTORY_ONLY)
    }

    /// Test a forward-slash normalized path relative to the scanned root
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

impl std::fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.pattern)
        } else {
            write!(f, "{}:{}", self.scope, self.pattern)
        }
    }
}

fn glob_to_regex(glob: &str) -> String {
    let chars = glob.chars().collect::<Vec<_>>();
    let mut regex = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let at_segment_start = i == 0 || chars[i - 1] == '/';
                if at_segment_start && chars.get(i + 2) == Some(&'/') {
                    // `**/` spans zero or more whole segments
                    regex.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    regex.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                regex.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                regex.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0; 4];
                regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    regex
}

/// Ordered list of compiled rules evaluated with last-match-wins semantics
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    pub fn new(rules: Vec<IgnoreRule>) -> Self {
        IgnoreRules { rules }
    }

    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: IgnoreRules) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter()
    }

    /// Fold over every rule; the last one that fires decides
    pub fn is_ignored(&self, path: &str) -> bool {
        self.rules.iter().fold(false, |ignored, rule| {
            if rule.matches(path) {
                !rule.is_negated()
            } else {
                ignored
            }
        })
    }

    /// The last rule matching `path`, if any
    pub fn deciding_rule(&self, path: &str) -> Option<&IgnoreRule> {
        self.rules.iter().rev().find(|rule| rule.matches(path))
    }

    /// The shortest of `path` and its ancestors that the rules exclude
    ///
    /// A walk never enters an excluded directory, so a path below one stays
    /// excluded even when a later rule re-includes it.
    pub fn excluding_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.match_indices('/')
            .map(|(separator, _)| &path[..separator])
            .chain(std::iter::once(path))
            .find(|prefix| self.is_ignored(prefix))
    }
}

impl FromIterator<IgnoreRule> for IgnoreRules {
    fn from_iter<I: IntoIterator<Item = IgnoreRule>>(iter: I) -> Self {
        IgnoreRules::new(iter.into_iter().collect())
    }
}

/// Split ignore-file text into rule lines, dropping blanks and `#` comments
pub fn parse_ignore_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Compile caller-supplied patterns, preserving their order
///
/// An entry may hold several lines; it is parsed like an ignore file.
pub fn compile_ignore_rules<S: AsRef<str>>(patterns: &[S]) -> IgnoreRules {
    patterns
        .iter()
        .flat_map(|pattern| parse_ignore_lines(pattern.as_ref()))
        .map(IgnoreRule::compile)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("*.log", "out.log", true)]
    #[case("*.log", "build/out.log", true)]
    #[case("*.log", "build/out.log.txt", false)]
    #[case("*.log", "logs", false)]
    #[case("build", "build", true)]
    #[case("build", "build/out.txt", true)]
    #[case("build", "src/build/out.txt", true)]
    #[case("build", "builder", false)]
    #[case("/build", "build/out.txt", true)]
    #[case("/build", "src/build", false)]
    #[case("docs/*.md", "docs/a.md", true)]
    #[case("docs/*.md", "docs/nested/a.md", false)]
    #[case("docs/*.md", "src/docs/a.md", false)]
    #[case("a?c", "abc", true)]
    #[case("a?c", "a/c", false)]
    #[case("**/temp", "temp", true)]
    #[case("**/temp", "x/y/temp", true)]
    #[case("a/**/b", "a/b", true)]
    #[case("a/**/b", "a/x/y/b", true)]
    #[case("a/**", "a/x/y", true)]
    #[case("node_modules/", "web/node_modules/pkg/index.js", true)]
    #[case("file.txt", "fileXtxt", false)]
    #[case("(x)+[y]", "(x)+[y]", true)]
    fn glob_rule_matches_path(#[case] line: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(IgnoreRule::compile(line).matches(path), expected);
    }

    #[test]
    fn flags_are_stripped_and_recorded() {
        let rule = IgnoreRule::compile("!/target/");

        assert!(rule.is_negated());
        assert!(rule.is_anchored());
        assert!(rule.is_directory_only());
        assert_eq!(rule.pattern(), "!/target/");
        assert!(rule.matches("target/debug/app"));
        assert!(!rule.matches("crates/target"));
    }

    #[test]
    fn scoped_rule_only_applies_beneath_its_directory() {
        let rule = IgnoreRule::compile_scoped("*.tmp", "sub");

        assert!(rule.matches("sub/a.tmp"));
        assert!(!rule.matches("sub/deep/a.tmp"));
        assert!(!rule.matches("a.tmp"));
        assert!(!rule.matches("other/a.tmp"));
    }

    #[test]
    fn scoped_anchored_rule_matches_directly_under_scope() {
        let rule = IgnoreRule::compile_scoped("/out", "pkg");

        assert!(rule.matches("pkg/out"));
        assert!(rule.matches("pkg/out/bin"));
        assert!(!rule.matches("pkg/nested/out"));
    }

    #[test]
    fn empty_body_matches_nothing() {
        let rule = IgnoreRule::compile("!");

        assert!(rule.is_negated());
        assert!(!rule.matches(""));
        assert!(!rule.matches("anything"));
    }

    #[test]
    fn later_negation_unexcludes_path() {
        let rules = compile_ignore_rules(&["*.log", "!keep.log"]);

        assert!(rules.is_ignored("debug.log"));
        assert!(!rules.is_ignored("keep.log"));
        assert_eq!(
            rules.deciding_rule("keep.log").map(IgnoreRule::pattern),
            Some("!keep.log")
        );
    }

    #[test]
    fn later_exclusion_overrides_earlier_negation() {
        let rules = compile_ignore_rules(&["!keep.log", "*.log"]);

        assert!(rules.is_ignored("keep.log"));
    }

    #[rstest]
    #[case("build/app", Some("build"))]
    #[case("build", Some("build"))]
    #[case("src/debug.log", Some("src/debug.log"))]
    #[case("src/keep.log", None)]
    #[case("src/main.rs", None)]
    fn excluded_ancestor_cannot_be_reincluded(
        #[case] path: &str,
        #[case] expected: Option<&str>,
    ) {
        let rules = compile_ignore_rules(&["build", "!build/app", "*.log", "!keep.log"]);

        assert_eq!(rules.excluding_prefix(path), expected);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let content = "# build output\n\n  target/  \n!target/keep\n";
        let lines = parse_ignore_lines(content).collect::<Vec<_>>();

        assert_eq!(lines, vec!["target/", "!target/keep"]);
        assert_eq!(compile_ignore_rules(&lines).len(), 2);
    }

    #[test]
    fn multi_line_caller_patterns_are_split() {
        let rules = compile_ignore_rules(&["*.tmp\n# scratch\ncache/", "dist"]);

        let patterns = rules.iter().map(IgnoreRule::pattern).collect::<Vec<_>>();
        assert_eq!(patterns, vec!["*.tmp", "cache/", "dist"]);
    }

    proptest! {
        #[test]
        fn compiling_arbitrary_patterns_never_panics(patterns in prop::collection::vec(".{0,12}", 0..8)) {
            let rules = compile_ignore_rules(&patterns);
            let _ = rules.is_ignored("some/path.txt");
        }

        #[test]
        fn last_conflicting_rule_wins(name in "[a-z]{1,8}", negate_last in any::<bool>()) {
            let (first, last) = if negate_last {
                (name.clone(), format!("!{name}"))
            } else {
                (format!("!{name}"), name.clone())
            };
            let rules = compile_ignore_rules(&[first, last]);

            prop_assert_eq!(rules.is_ignored(&name), !negate_last);
        }
    }
}
