//! Content digests
//!
//! Files are addressed by the SHA-1 of their bytes, rendered as 40 lowercase
//! hex characters. When line-break normalization is requested, CRLF and lone
//! CR sequences are collapsed to LF before hashing.

use serde::Serialize;
use sha1::{Digest, Sha1};
use std::borrow::Cow;
use std::path::Path;

/// Hex-encoded SHA-1 of a file's (possibly normalized) content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DigestId(String);

impl DigestId {
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(format!("{:x}", hasher.finalize()))
    }
}

impl AsRef<str> for DigestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DigestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Digest of one file, or the marker for a file that could not be read
///
/// An unreadable digest is never the same content as anything, including
/// another unreadable digest. An empty file is readable and has a regular
/// digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDigest {
    Hashed(DigestId),
    Unreadable,
}

impl ContentDigest {
    pub fn of_bytes(data: &[u8], normalize_line_breaks: bool) -> Self {
        let data = if normalize_line_breaks {
            normalize_line_breaks_in(data)
        } else {
            Cow::Borrowed(data)
        };
        ContentDigest::Hashed(DigestId::of_bytes(&data))
    }

    /// Read and digest a file; read failures yield [`ContentDigest::Unreadable`]
    pub fn of_file(path: &Path, normalize_line_breaks: bool) -> Self {
        match std::fs::read(path) {
            Ok(data) => Self::of_bytes(&data, normalize_line_breaks),
            Err(err) => {
                log::debug!("cannot read {path:?} for hashing: {err}");
                ContentDigest::Unreadable
            }
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, ContentDigest::Unreadable)
    }

    pub fn id(&self) -> Option<&DigestId> {
        match self {
            ContentDigest::Hashed(id) => Some(id),
            ContentDigest::Unreadable => None,
        }
    }

    /// Content equality: both readable and bit-equal
    pub fn same_content(&self, other: &ContentDigest) -> bool {
        match (self, other) {
            (ContentDigest::Hashed(a), ContentDigest::Hashed(b)) => a == b,
            _ => false,
        }
    }
}

/// Collapse `\r\n` and lone `\r` into `\n`
pub fn normalize_line_breaks_in(data: &[u8]) -> Cow<'_, [u8]> {
    if !data.contains(&b'\r') {
        return Cow::Borrowed(data);
    }

    let mut normalized = Vec::with_capacity(data.len());
    let mut bytes = data.iter().peekable();
    while let Some(&byte) = bytes.next() {
        if byte == b'\r' {
            if bytes.peek() == Some(&&b'\n') {
                bytes.next();
            }
            normalized.push(b'\n');
        } else {
            normalized.push(byte);
        }
    }

    Cow::Owned(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn digest_matches_known_sha1() {
        let digest = DigestId::of_bytes(b"hello\n");

        assert_eq!(digest.as_ref(), "f572d396fae9206628714fb2ce00f72e94f2258f");
    }

    #[rstest]
    #[case(b"a\r\nb\r\n", b"a\nb\n")]
    #[case(b"a\rb\r", b"a\nb\n")]
    #[case(b"a\r\r\nb", b"a\n\nb")]
    #[case(b"plain\n", b"plain\n")]
    fn line_breaks_are_collapsed(#[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(normalize_line_breaks_in(input).as_ref(), expected);
    }

    #[test]
    fn normalization_makes_crlf_and_lf_content_equal() {
        let crlf = ContentDigest::of_bytes(b"x\r\ny\r\n", true);
        let lf = ContentDigest::of_bytes(b"x\ny\n", true);
        let raw_crlf = ContentDigest::of_bytes(b"x\r\ny\r\n", false);

        assert!(crlf.same_content(&lf));
        assert!(!raw_crlf.same_content(&lf));
    }

    #[test]
    fn unreadable_never_has_same_content() {
        let empty = ContentDigest::of_bytes(b"", false);

        assert!(!ContentDigest::Unreadable.same_content(&ContentDigest::Unreadable));
        assert!(!ContentDigest::Unreadable.same_content(&empty));
        assert!(empty.same_content(&ContentDigest::of_bytes(b"", true)));
    }
}
