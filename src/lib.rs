//! Tar archive entries and their 512-byte header blocks.
//!
//! This crate models a single archive member ([`TarEntry`]) and converts it to
//! and from the fixed-size header block that precedes the member's data in a
//! tar stream. Reading or writing whole archives (framing, padding between
//! members, end-of-archive markers) is left to the caller, who hands this
//! crate one 512-byte block at a time.
//!
//! # Header Field Layout
//!
//! | Offset | Size | Field     | Description                              |
//! |--------|------|-----------|------------------------------------------|
//! | 0      | 100  | name      | Entry path (NUL-terminated if < 100)     |
//! | 100    | 8    | mode      | Permission and type bits, octal          |
//! | 108    | 8    | uid       | Owner user ID, octal                     |
//! | 116    | 8    | gid       | Owner group ID, octal                    |
//! | 124    | 12   | size      | Content length, octal                    |
//! | 136    | 12   | mtime     | Modification time (Unix epoch), octal    |
//! | 148    | 8    | checksum  | Byte sum of the block, octal             |
//! | 156    | 1    | linkflag  | Entry type (see [`EntryType`])           |
//! | 157    | 100  | linkname  | Link target                              |
//! | 257    | 8    | magic     | [`TMAGIC`] or [`GNU_TMAGIC`]             |
//! | 265    | 32   | uname     | Owner user name                          |
//! | 297    | 32   | gname     | Owner group name                         |
//! | 329    | 8    | devmajor  | Device major number, octal               |
//! | 337    | 8    | devminor  | Device minor number, octal               |
//!
//! The remaining 167 bytes are zero.
//!
//! Numeric fields are zero-padded octal digits followed by a NUL; the checksum
//! is six digits followed by NUL and a space. Values wider than their field
//! keep only their low-order digits. Checksums are written on encode but not
//! checked on decode.
//!
//! # Example
//!
//! ```
//! use tar_entry::{TarEntry, HEADER_SIZE};
//!
//! let mut entry = TarEntry::new("/var/log/app.log");
//! assert_eq!(entry.name(), "var/log/app.log");
//! entry.set_size(1024);
//!
//! let mut block = [0u8; HEADER_SIZE];
//! entry.write_entry_header(&mut block);
//!
//! let decoded = TarEntry::from_header_bytes(&block).unwrap();
//! assert_eq!(decoded, entry);
//! assert_eq!(decoded.size(), 1024);
//! ```

pub mod checksum;
pub mod entry;
pub mod entry_type;
pub mod error;
pub mod fs;
pub mod header;
pub mod name;
pub mod normalize;
pub mod octal;

pub use checksum::{compute_checksum, header_checksum};
pub use entry::TarEntry;
pub use entry_type::{
    EntryType, LF_BLK, LF_CHR, LF_CONTIG, LF_DIR, LF_FIFO, LF_GNUTYPE_LONGNAME, LF_LINK,
    LF_NORMAL, LF_OLDNORM, LF_SYMLINK,
};
pub use error::{EntryError, Result};
pub use header::{decode_header, encode_header, RawEntryHeader};
pub use name::{format_name, parse_name, truncate_null};
pub use normalize::{normalize_file_name, OsFamily, Platform};
pub use octal::{format_checksum_octal, format_octal, parse_octal};

/// Size of a header block in bytes.
pub const HEADER_SIZE: usize = 512;

/// Magic for standard headers, NUL-padded to 8 bytes when written.
pub const TMAGIC: &str = "ustar";

/// Magic for GNU headers ("ustar" and two spaces, then a NUL when written).
pub const GNU_TMAGIC: &str = "ustar  ";

/// Name GNU tar gives the long name entry preceding an entry whose name does
/// not fit the header.
pub const GNU_LONGLINK: &str = "././@LongLink";

/// Default mode for directory entries.
pub const DEFAULT_DIR_MODE: u32 = 0o40755;

/// Default mode for file entries.
pub const DEFAULT_FILE_MODE: u32 = 0o100644;
