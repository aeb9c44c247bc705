use crate::artifacts::snapshot::EntryKind;
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    OnlyA,
    OnlyB,
    Match,
    Different,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::OnlyA => "only-a",
            Status::OnlyB => "only-b",
            Status::Match => "match",
            Status::Different => "different",
        }
    }

    /// One-character marker used in listings
    pub fn marker(&self) -> &'static str {
        match self {
            Status::OnlyA => "<",
            Status::OnlyB => ">",
            Status::Match => "=",
            Status::Different => "!",
        }
    }

    pub fn colorize(&self, text: &str) -> ColoredString {
        match self {
            Status::OnlyA => text.red(),
            Status::OnlyB => text.green(),
            Status::Match => text.normal(),
            Status::Different => text.yellow(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of one path present in either snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRecord {
    pub path: String,
    pub kind: EntryKind,
    pub status: Status,
    #[serde(rename = "inA")]
    pub in_a: bool,
    #[serde(rename = "inB")]
    pub in_b: bool,
}

impl ComparisonRecord {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Path as listed: directories carry a trailing separator
    pub fn display_path(&self) -> String {
        if self.is_dir() {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }
}

impl std::fmt::Display for ComparisonRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = format!("{} {}", self.status.marker(), self.display_path());
        write!(f, "{}", self.status.colorize(&line))
    }
}
