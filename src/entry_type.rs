//! Link flag values and their typed view.
//!
//! The header stores the member type as a single raw byte. [`crate::TarEntry`]
//! keeps that byte as-is; [`EntryType`] is the typed interpretation.

/// Old-style normal file ('\0').
pub const LF_OLDNORM: u8 = 0;
/// Normal file.
pub const LF_NORMAL: u8 = b'0';
/// Hard link.
pub const LF_LINK: u8 = b'1';
/// Symbolic link.
pub const LF_SYMLINK: u8 = b'2';
/// Character device.
pub const LF_CHR: u8 = b'3';
/// Block device.
pub const LF_BLK: u8 = b'4';
/// Directory.
pub const LF_DIR: u8 = b'5';
/// FIFO/named pipe.
pub const LF_FIFO: u8 = b'6';
/// Contiguous file.
pub const LF_CONTIG: u8 = b'7';
/// GNU long name extension: the entry data is the name of the next entry.
pub const LF_GNUTYPE_LONGNAME: u8 = b'L';

/// Tar entry type indicating the kind of file system object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file (type '0' or '\0' for old tar compatibility).
    Regular,
    /// Hard link to another file in the archive (type '1').
    Link,
    /// Symbolic link (type '2').
    Symlink,
    /// Character device (type '3').
    Char,
    /// Block device (type '4').
    Block,
    /// Directory (type '5').
    Directory,
    /// FIFO/named pipe (type '6').
    Fifo,
    /// Contiguous file (type '7', rarely used).
    Continuous,
    /// GNU tar long name extension (type 'L').
    GnuLongName,
    /// Unknown or unsupported entry type.
    Other(u8),
}

impl EntryType {
    /// Parse an entry type from a raw link flag.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            LF_NORMAL | LF_OLDNORM => EntryType::Regular,
            LF_LINK => EntryType::Link,
            LF_SYMLINK => EntryType::Symlink,
            LF_CHR => EntryType::Char,
            LF_BLK => EntryType::Block,
            LF_DIR => EntryType::Directory,
            LF_FIFO => EntryType::Fifo,
            LF_CONTIG => EntryType::Continuous,
            LF_GNUTYPE_LONGNAME => EntryType::GnuLongName,
            other => EntryType::Other(other),
        }
    }

    /// Convert an entry type to its link flag.
    ///
    /// Note that `Regular` is encoded as '0', not '\0'.
    #[must_use]
    pub fn to_byte(self) -> u8 {
        match self {
            EntryType::Regular => LF_NORMAL,
            EntryType::Link => LF_LINK,
            EntryType::Symlink => LF_SYMLINK,
            EntryType::Char => LF_CHR,
            EntryType::Block => LF_BLK,
            EntryType::Directory => LF_DIR,
            EntryType::Fifo => LF_FIFO,
            EntryType::Continuous => LF_CONTIG,
            EntryType::GnuLongName => LF_GNUTYPE_LONGNAME,
            EntryType::Other(b) => b,
        }
    }

    /// Returns true if this is a regular file entry.
    #[must_use]
    pub fn is_file(self) -> bool {
        matches!(self, EntryType::Regular | EntryType::Continuous)
    }

    /// Returns true if this is a directory entry.
    #[must_use]
    pub fn is_dir(self) -> bool {
        self == EntryType::Directory
    }

    /// Returns true for hard and symbolic links.
    #[must_use]
    pub fn is_link(self) -> bool {
        matches!(self, EntryType::Link | EntryType::Symlink)
    }

    /// Returns true for character and block devices.
    #[must_use]
    pub fn is_device(self) -> bool {
        matches!(self, EntryType::Char | EntryType::Block)
    }
}

impl From<u8> for EntryType {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl From<EntryType> for u8 {
    fn from(entry_type: EntryType) -> Self {
        entry_type.to_byte()
    }
}
