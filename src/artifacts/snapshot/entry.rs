use crate::artifacts::snapshot::digest::ContentDigest;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One path of a snapshot
///
/// Files carry their size and content digest; directories carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    kind: EntryKind,
    size: Option<u64>,
    digest: Option<ContentDigest>,
}

impl Entry {
    pub fn file(path: impl Into<String>, size: u64, digest: ContentDigest) -> Self {
        Entry {
            path: path.into(),
            kind: EntryKind::File,
            size: Some(size),
            digest: Some(digest),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Entry {
            path: path.into(),
            kind: EntryKind::Directory,
            size: None,
            digest: None,
        }
    }

    /// Forward-slash separated path relative to the snapshot root
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn digest(&self) -> Option<&ContentDigest> {
        self.digest.as_ref()
    }

    /// Whether two file entries hold bit-equal (normalized) content
    pub fn same_content(&self, other: &Entry) -> bool {
        match (&self.digest, &other.digest) {
            (Some(a), Some(b)) => a.same_content(b),
            _ => false,
        }
    }
}
