//! Fixed-width NUL-padded text fields.
//!
//! Text shorter than its field is followed by NUL bytes up to the field
//! width. Text that exactly fills the field carries no terminator, so readers
//! must bound every field by its width rather than rely on a trailing NUL.

/// Write `text` into `field`, padding the remainder with NUL bytes.
///
/// At most `field.len()` bytes are copied; longer text is cut at the field
/// boundary.
pub fn format_name(text: &str, field: &mut [u8]) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);
    field[len..].fill(0);
}

/// Read a text field, stopping at the first NUL.
///
/// Bytes after the first NUL are ignored. Invalid UTF-8 is replaced with
/// U+FFFD.
#[must_use]
pub fn parse_name(field: &[u8]) -> String {
    String::from_utf8_lossy(truncate_null(field)).into_owned()
}

/// Truncate a byte slice at the first null byte.
///
/// If no null byte is found, returns the entire slice.
///
/// # Example
///
/// ```
/// use tar_entry::truncate_null;
///
/// assert_eq!(truncate_null(b"hello\0world"), b"hello");
/// assert_eq!(truncate_null(b"no null here"), b"no null here");
/// assert_eq!(truncate_null(b"\0empty"), b"");
/// ```
#[must_use]
pub fn truncate_null(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(pos) => &bytes[..pos],
        None => bytes,
    }
}
