//! Text encoding detection and decoding
//!
//! Point-of-sale exports come in whatever encoding the till software was
//! configured with. A byte-order mark wins, valid UTF-8 is taken as UTF-8,
//! and everything else is read as Windows-1252.

use crate::domain::{PosanonError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Label that requests detection instead of a fixed encoding
pub const AUTO: &str = "auto";

/// Detect the encoding of raw file contents
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Resolve a configured encoding label, detecting from `bytes` for [`AUTO`]
///
/// # Errors
///
/// Returns [`PosanonError::Encoding`] for labels unknown to the WHATWG
/// encoding standard.
pub fn resolve_encoding(label: &str, bytes: &[u8]) -> Result<&'static Encoding> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(AUTO) {
        return Ok(detect_encoding(bytes));
    }
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| PosanonError::Encoding(format!("Unknown encoding label: {label}")))
}

/// Check that a label is either [`AUTO`] or a known encoding
pub fn is_known_label(label: &str) -> bool {
    let label = label.trim();
    label.eq_ignore_ascii_case(AUTO) || Encoding::for_label(label.as_bytes()).is_some()
}

/// Decode bytes, stripping a byte-order mark
///
/// A BOM overrides `encoding`. Malformed sequences are replaced with U+FFFD
/// and reported with a warning.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = actual.name(),
            "Input contained malformed sequences, replaced with U+FFFD"
        );
    }
    text.into_owned()
}
