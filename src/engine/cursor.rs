//! Cursor encoding
//!
//! A cursor is the standard base64 encoding of a decimal offset string.
//! Callers treat it as opaque; only the engine that issued it decodes it.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode an offset into a cursor
pub fn encode_cursor(offset: usize) -> String {
    STANDARD.encode(offset.to_string())
}

/// Decode a cursor back into an offset.
///
/// Returns `None` for anything that is not base64 of a decimal integer.
pub fn decode_cursor(cursor: &str) -> Option<usize> {
    let bytes = STANDARD.decode(cursor).ok()?;
    let text = std::str::from_utf8(&bytes).ok()?;
    text.trim().parse().ok()
}
