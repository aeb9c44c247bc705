use derive_new::new;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Same,
    Added,
    Removed,
}

impl DiffLineKind {
    pub fn marker(&self) -> char {
        match self {
            DiffLineKind::Same => ' ',
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
        }
    }
}

/// One aligned line
///
/// Line numbers are 1-based; added lines have no line in A, removed lines
/// have no line in B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    #[serde(rename = "lineA")]
    pub line_a: Option<usize>,
    #[serde(rename = "lineB")]
    pub line_b: Option<usize>,
    pub content: String,
}

impl DiffLine {
    pub fn same(line_a: usize, line_b: usize, content: impl Into<String>) -> Self {
        DiffLine {
            kind: DiffLineKind::Same,
            line_a: Some(line_a),
            line_b: Some(line_b),
            content: content.into(),
        }
    }

    pub fn added(line_b: usize, content: impl Into<String>) -> Self {
        DiffLine {
            kind: DiffLineKind::Added,
            line_a: None,
            line_b: Some(line_b),
            content: content.into(),
        }
    }

    pub fn removed(line_a: usize, content: impl Into<String>) -> Self {
        DiffLine {
            kind: DiffLineKind::Removed,
            line_a: Some(line_a),
            line_b: None,
            content: content.into(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != DiffLineKind::Same
    }
}

impl Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.content)
    }
}

pub trait DiffAlgorithm {
    type Table;
    type Subsequence;
    type Alignment;

    fn compute_table(&self) -> Self::Table;
    fn backtrack(&self) -> Self::Subsequence;
    fn diff(&self) -> Self::Alignment;
    fn format_diff(&self) -> String
    where
        Self::Alignment: AsRef<[DiffLine]>,
    {
        self.diff()
            .as_ref()
            .iter()
            .map(DiffLine::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Longest-common-subsequence line alignment
///
/// Runs in O(len(a) * len(b)) time and space; callers bound input size.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LcsDiff<'d, S> {
    a: &'d [S],
    b: &'d [S],
}

impl<'d, S: AsRef<str>> DiffAlgorithm for LcsDiff<'d, S> {
    type Table = Vec<Vec<usize>>;
    type Subsequence = Vec<&'d str>;
    type Alignment = Vec<DiffLine>;

    // table[i][j] holds the LCS length of a[..i] and b[..j]
    fn compute_table(&self) -> Self::Table {
        let (n, m) = (self.a.len(), self.b.len());
        let mut table = vec![vec![0; m + 1]; n + 1];

        for i in 1..=n {
            for j in 1..=m {
                table[i][j] = if self.a[i - 1].as_ref() == self.b[j - 1].as_ref() {
                    table[i - 1][j - 1] + 1
                } else {
                    table[i - 1][j].max(table[i][j - 1])
                };
            }
        }

        table
    }

    fn backtrack(&self) -> Self::Subsequence {
        let table = self.compute_table();
        let (a, b) = (self.a, self.b);
        let (mut i, mut j) = (a.len(), b.len());
        let mut lcs = Vec::with_capacity(table[i][j]);

        while i > 0 && j > 0 {
            let line = a[i - 1].as_ref();
            if line == b[j - 1].as_ref() {
                lcs.push(line);
                i -= 1;
                j -= 1;
            } else if table[i - 1][j] > table[i][j - 1] {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        lcs.reverse();
        lcs
    }

    fn diff(&self) -> Self::Alignment {
        let lcs = self.backtrack();
        let (a, b) = (self.a, self.b);
        let (mut i, mut j, mut k) = (0, 0, 0);
        let mut lines = Vec::with_capacity(a.len().max(b.len()));

        while i < a.len() || j < b.len() {
            let common = lcs.get(k).copied();
            let a_line = a.get(i).map(AsRef::as_ref);
            let b_line = b.get(j).map(AsRef::as_ref);

            match (common, a_line, b_line) {
                (Some(common), Some(a_line), Some(b_line))
                    if a_line == common && b_line == common =>
                {
                    lines.push(DiffLine::same(i + 1, j + 1, a_line));
                    i += 1;
                    j += 1;
                    k += 1;
                }
                // A sits on the next common line, so B has extra lines first
                (Some(common), Some(a_line), Some(b_line)) if a_line == common => {
                    lines.push(DiffLine::added(j + 1, b_line));
                    j += 1;
                }
                (_, Some(a_line), _) => {
                    lines.push(DiffLine::removed(i + 1, a_line));
                    i += 1;
                }
                (_, None, Some(b_line)) => {
                    lines.push(DiffLine::added(j + 1, b_line));
                    j += 1;
                }
                (_, None, None) => break,
            }
        }

        lines
    }
}

/// Align two line sequences
pub fn diff_lines<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<DiffLine> {
    LcsDiff::new(a, b).diff()
}
