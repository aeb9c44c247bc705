use crate::artifacts::snapshot::digest::normalize_line_breaks_in;
use thiserror::Error;

/// Content that cannot be shown as lines of text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("cannot display as text: invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("cannot display as text: binary content")]
    Binary,
}

/// Decode file bytes for line diffing
///
/// NUL bytes or invalid UTF-8 mark the content as binary. With
/// `normalize_line_breaks`, CRLF and CR become LF so that the diff agrees
/// with the normalized digests.
pub fn decode_text(data: &[u8], normalize_line_breaks: bool) -> Result<String, TextError> {
    if data.contains(&0) {
        return Err(TextError::Binary);
    }

    let data = if normalize_line_breaks {
        normalize_line_breaks_in(data).into_owned()
    } else {
        data.to_vec()
    };

    String::from_utf8(data).map_err(|err| TextError::InvalidUtf8 {
        offset: err.utf8_error().valid_up_to(),
    })
}

/// Split on `\n`; a trailing newline yields a final empty line
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
