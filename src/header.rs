//! The 512-byte header block and its codec.
//!
//! | Offset | Size | Field     | Encoding                         |
//! |--------|------|-----------|----------------------------------|
//! | 0      | 100  | name      | NUL-padded text                  |
//! | 100    | 8    | mode      | octal                            |
//! | 108    | 8    | uid       | octal                            |
//! | 116    | 8    | gid       | octal                            |
//! | 124    | 12   | size      | octal                            |
//! | 136    | 12   | mtime     | octal                            |
//! | 148    | 8    | checksum  | octal, NUL, space                |
//! | 156    | 1    | linkflag  | raw byte                         |
//! | 157    | 100  | linkname  | NUL-padded text                  |
//! | 257    | 8    | magic     | NUL-padded text                  |
//! | 265    | 32   | uname     | NUL-padded text                  |
//! | 297    | 32   | gname     | NUL-padded text                  |
//! | 329    | 8    | devmajor  | octal                            |
//! | 337    | 8    | devminor  | octal                            |
//! | 345    | 167  | padding   | zero bytes                       |

use std::fmt;

use log::trace;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    checksum::compute_checksum,
    error::{EntryError, Result},
    name::{format_name, parse_name, truncate_null},
    octal::{format_checksum_octal, format_octal, parse_octal},
    TarEntry, HEADER_SIZE,
};

/// Width of the name and link name fields.
pub const NAMELEN: usize = 100;
/// Width of the mode field.
pub const MODELEN: usize = 8;
/// Width of the user id field.
pub const UIDLEN: usize = 8;
/// Width of the group id field.
pub const GIDLEN: usize = 8;
/// Width of the size field.
pub const SIZELEN: usize = 12;
/// Width of the modification time field.
pub const MODTIMELEN: usize = 12;
/// Width of the checksum field.
pub const CHKSUMLEN: usize = 8;
/// Width of the magic field.
pub const MAGICLEN: usize = 8;
/// Width of the user name field.
pub const UNAMELEN: usize = 32;
/// Width of the group name field.
pub const GNAMELEN: usize = 32;
/// Width of each device number field.
pub const DEVLEN: usize = 8;

/// Offset of the checksum field.
pub const CHKSUM_OFFSET: usize = NAMELEN + MODELEN + UIDLEN + GIDLEN + SIZELEN + MODTIMELEN;
/// Offset of the link flag byte.
pub const LINKFLAG_OFFSET: usize = CHKSUM_OFFSET + CHKSUMLEN;
/// Offset of the magic field.
pub const MAGIC_OFFSET: usize = LINKFLAG_OFFSET + 1 + NAMELEN;
/// Bytes used by fields; the rest of the block is zero padding.
pub const FIELDS_LEN: usize = MAGIC_OFFSET + MAGICLEN + UNAMELEN + GNAMELEN + 2 * DEVLEN;

/// Header block with named fields.
///
/// Every field is a byte array, so the struct has no padding and maps
/// directly onto a 512-byte block. See the module documentation for the
/// layout.
#[derive(Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct RawEntryHeader {
    /// Entry name (NUL-terminated if shorter than 100 bytes).
    pub name: [u8; NAMELEN],
    /// Mode in octal ASCII.
    pub mode: [u8; MODELEN],
    /// Owner user id in octal ASCII.
    pub uid: [u8; UIDLEN],
    /// Owner group id in octal ASCII.
    pub gid: [u8; GIDLEN],
    /// Content size in octal ASCII.
    pub size: [u8; SIZELEN],
    /// Modification time in octal ASCII.
    pub mtime: [u8; MODTIMELEN],
    /// Header checksum in octal ASCII.
    pub checksum: [u8; CHKSUMLEN],
    /// Link flag.
    pub linkflag: u8,
    /// Link target.
    pub linkname: [u8; NAMELEN],
    /// Format signature.
    pub magic: [u8; MAGICLEN],
    /// Owner user name.
    pub uname: [u8; UNAMELEN],
    /// Owner group name.
    pub gname: [u8; GNAMELEN],
    /// Device major number in octal ASCII.
    pub devmajor: [u8; DEVLEN],
    /// Device minor number in octal ASCII.
    pub devminor: [u8; DEVLEN],
    /// Zero padding to fill the block.
    pub pad: [u8; HEADER_SIZE - FIELDS_LEN],
}

impl Default for RawEntryHeader {
    fn default() -> Self {
        Self {
            name: [0u8; NAMELEN],
            mode: [0u8; MODELEN],
            uid: [0u8; UIDLEN],
            gid: [0u8; GIDLEN],
            size: [0u8; SIZELEN],
            mtime: [0u8; MODTIMELEN],
            checksum: [0u8; CHKSUMLEN],
            linkflag: 0,
            linkname: [0u8; NAMELEN],
            magic: [0u8; MAGICLEN],
            uname: [0u8; UNAMELEN],
            gname: [0u8; GNAMELEN],
            devmajor: [0u8; DEVLEN],
            devminor: [0u8; DEVLEN],
            pad: [0u8; HEADER_SIZE - FIELDS_LEN],
        }
    }
}

impl fmt::Debug for RawEntryHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEntryHeader")
            .field("name", &String::from_utf8_lossy(truncate_null(&self.name)))
            .field("mode", &String::from_utf8_lossy(truncate_null(&self.mode)))
            .field("linkflag", &self.linkflag)
            .field("magic", &String::from_utf8_lossy(truncate_null(&self.magic)))
            .finish_non_exhaustive()
    }
}

impl RawEntryHeader {
    /// View the first [`HEADER_SIZE`] bytes of `bytes` as a header.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InsufficientData`] if the slice is too short.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(EntryError::InsufficientData(bytes.len()));
        }
        Self::ref_from_bytes(&bytes[..HEADER_SIZE])
            .map_err(|_| EntryError::InsufficientData(bytes.len()))
    }

    /// Fill every field from `entry`, leaving the checksum blank (spaces).
    fn from_entry(entry: &TarEntry) -> Self {
        let mut header = Self::default();

        format_name(&entry.name, &mut header.name);
        format_octal(u64::from(entry.mode), &mut header.mode);
        format_octal(entry.user_id, &mut header.uid);
        format_octal(entry.group_id, &mut header.gid);
        format_octal(entry.size, &mut header.size);
        format_octal(entry.mod_time, &mut header.mtime);
        header.checksum.fill(b' ');
        header.linkflag = entry.link_flag;
        format_name(&entry.link_name, &mut header.linkname);
        format_name(&entry.magic, &mut header.magic);
        format_name(&entry.user_name, &mut header.uname);
        format_name(&entry.group_name, &mut header.gname);
        format_octal(u64::from(entry.dev_major), &mut header.devmajor);
        format_octal(u64::from(entry.dev_minor), &mut header.devminor);

        header
    }

    /// Build an entry from the header fields. The checksum is ignored.
    fn parse_entry(&self) -> TarEntry {
        let mut entry = TarEntry::default();

        entry.name = parse_name(&self.name);
        entry.mode = parse_octal(&self.mode) as u32;
        entry.user_id = parse_octal(&self.uid);
        entry.group_id = parse_octal(&self.gid);
        entry.size = parse_octal(&self.size);
        entry.mod_time = parse_octal(&self.mtime);
        entry.link_flag = self.linkflag;
        entry.link_name = parse_name(&self.linkname);
        entry.magic = parse_name(&self.magic);
        entry.user_name = parse_name(&self.uname);
        entry.group_name = parse_name(&self.gname);
        entry.dev_major = parse_octal(&self.devmajor) as u32;
        entry.dev_minor = parse_octal(&self.devminor) as u32;

        entry
    }
}

/// Encode `entry` into `block`.
///
/// Every field is written in layout order, the padding is zeroed, and the
/// checksum is then computed over the block with its own field blanked to
/// spaces and written back. Numeric values too large for their field lose
/// their high-order digits.
pub fn encode_header(entry: &TarEntry, block: &mut [u8; HEADER_SIZE]) {
    let mut header = RawEntryHeader::from_entry(entry);

    let checksum = compute_checksum(header.as_bytes());
    format_checksum_octal(checksum, &mut header.checksum);

    block.copy_from_slice(header.as_bytes());
    trace!("encoded header for {:?} (checksum {checksum:o})", entry.name);
}

/// Decode an entry from the first [`HEADER_SIZE`] bytes of `bytes`.
///
/// The stored checksum is not checked, so a block with a corrupt checksum
/// decodes like any other. The returned entry has no file reference.
///
/// # Errors
///
/// Returns [`EntryError::InsufficientData`] if `bytes` is shorter than a
/// header block. Nothing is decoded in that case.
pub fn decode_header(bytes: &[u8]) -> Result<TarEntry> {
    let header = RawEntryHeader::from_bytes(bytes)?;
    let entry = header.parse_entry();
    trace!(
        "decoded header for {:?} (stored checksum {:o})",
        entry.name,
        parse_octal(&header.checksum)
    );
    Ok(entry)
}
