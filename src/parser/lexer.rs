//! Numeric token extraction
//!
//! The single low-level parsing primitive: pull a signed decimal token
//! out of a line starting at a byte offset. Extraction is deliberately
//! permissive (any run of digits, signs and dots); deciding whether the
//! token is a well-formed number is the caller's job.

/// Characters allowed in a numeric token.
#[inline]
fn is_number_char(c: u8) -> bool {
    c.is_ascii_digit() || c == b'+' || c == b'-' || c == b'.'
}

/// Return the maximal run of numeric characters starting at `start`.
///
/// Stops at end of line or at the first disallowed character. An offset
/// at or past the end of the line yields an empty token.
pub fn number_token(line: &str, start: usize) -> &str {
    let bytes = line.as_bytes();
    if start >= bytes.len() {
        return "";
    }

    let mut end = start;
    while end < bytes.len() && is_number_char(bytes[end]) {
        end += 1;
    }

    // Only ASCII bytes are consumed, so `end` is a char boundary
    // whenever `start` is; a non-boundary start yields an empty token.
    line.get(start..end).unwrap_or("")
}
