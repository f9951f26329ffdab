//! Fixed-width octal ASCII numeric fields.
//!
//! Numeric header fields hold zero-padded base-8 digits followed by a NUL
//! terminator, e.g. `"0000644\0"` for mode `0o644` in an 8-byte field. The
//! checksum field reserves two terminator bytes instead of one and ends in
//! NUL followed by a space (`"006543\0 "`).
//!
//! Values that need more digits than a field can hold are written with only
//! their low-order digits. Nothing reports the overflow; callers that care
//! must check the value against the field capacity themselves.

/// Write `value` into `field` as zero-padded octal digits plus a NUL.
///
/// The field receives `field.len() - 1` digits. A one-byte field holds only
/// the terminator and an empty field is left untouched.
pub fn format_octal(value: u64, field: &mut [u8]) {
    let Some((terminator, digits)) = field.split_last_mut() else {
        return;
    };
    write_digits(value, digits);
    *terminator = 0;
}

/// Write a checksum into `field` as zero-padded octal digits, NUL, space.
///
/// Fields shorter than two bytes fall back to [`format_octal`].
pub fn format_checksum_octal(value: u64, field: &mut [u8]) {
    let len = field.len();
    if len < 2 {
        format_octal(value, field);
        return;
    }
    write_digits(value, &mut field[..len - 2]);
    field[len - 2] = 0;
    field[len - 1] = b' ';
}

fn write_digits(mut value: u64, digits: &mut [u8]) {
    for slot in digits.iter_mut().rev() {
        *slot = b'0' + (value & 7) as u8;
        value >>= 3;
    }
}

/// Parse an octal ASCII field into a u64.
///
/// Leading spaces and NULs are skipped, then consecutive digits `0`-`7` are
/// accumulated until the first byte that is not one. A field with no digits
/// parses as zero. For example:
/// - `"0000644\0"` -> 420
/// - `"     123 "` -> 83
/// - `"\0\0\0\0"` -> 0
#[must_use]
pub fn parse_octal(bytes: &[u8]) -> u64 {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != 0)
        .unwrap_or(bytes.len());

    bytes[start..]
        .iter()
        .take_while(|&&b| (b'0'..=b'7').contains(&b))
        .fold(0u64, |value, &b| (value << 3) | u64::from(b - b'0'))
}

/// Largest value that fits in a numeric field of `width` bytes.
///
/// One byte of the field is the terminator, so this is `8^(width-1) - 1`.
#[must_use]
pub fn max_octal_value(width: usize) -> u64 {
    match width.saturating_sub(1) {
        0 => 0,
        digits if digits >= 21 => u64::MAX,
        digits => (1u64 << (3 * digits)) - 1,
    }
}
