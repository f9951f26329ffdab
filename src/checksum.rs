//! Header checksums.

use crate::header::{CHKSUM_OFFSET, CHKSUMLEN};

/// Sum every byte of `block` as an unsigned value.
///
/// When building a header this must run after every other field, trailing
/// padding included, has been written and while the checksum field still
/// holds ASCII spaces.
#[must_use]
pub fn compute_checksum(block: &[u8]) -> u64 {
    block.iter().map(|&b| u64::from(b)).sum()
}

/// Compute the checksum of a finished header block.
///
/// The checksum field (bytes 148..156) is counted as spaces whatever it
/// currently holds, so this gives the value that should be stored there.
#[must_use]
pub fn header_checksum(block: &[u8]) -> u64 {
    let field = CHKSUM_OFFSET..CHKSUM_OFFSET + CHKSUMLEN;
    block
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if field.contains(&i) {
                u64::from(b' ')
            } else {
                u64::from(b)
            }
        })
        .sum()
}
