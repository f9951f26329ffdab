//! A single archive member and its metadata.

use std::{
    any::Any,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    entry_type::{EntryType, LF_DIR, LF_GNUTYPE_LONGNAME, LF_NORMAL},
    error::Result,
    fs,
    header::{decode_header, encode_header},
    normalize::{normalize_file_name, Platform},
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, GNU_LONGLINK, GNU_TMAGIC, HEADER_SIZE, TMAGIC,
};

/// The live file an entry was built from.
#[derive(Debug, Clone)]
struct FileRef {
    path: PathBuf,
    platform: Platform,
}

/// Metadata for one member of a tar archive.
///
/// An entry is created in one of three ways:
///
/// - from a name alone ([`TarEntry::new`]), with every other field given a
///   default, for members built "by hand";
/// - from a file on disk ([`TarEntry::from_path`]), which keeps a reference to
///   the path so directories can be listed later;
/// - from a 512-byte header block ([`TarEntry::from_header_bytes`]).
///
/// Setters replace one field and never adjust the others: changing the link
/// flag, for instance, leaves the magic as it was.
///
/// Two entries are equal, and hash alike, when their names are equal.
///
/// # Example
///
/// ```
/// use tar_entry::TarEntry;
///
/// let mut entry = TarEntry::new("dir/sub/file.txt");
/// entry.set_size(42);
/// entry.set_mod_time(1_700_000_000);
///
/// let block = entry.to_header_bytes();
/// let decoded = TarEntry::from_header_bytes(&block).unwrap();
/// assert_eq!(decoded.name(), "dir/sub/file.txt");
/// assert_eq!(decoded.size(), 42);
/// assert_eq!(decoded.mode(), 0o100644);
/// ```
#[derive(Debug, Clone)]
pub struct TarEntry {
    pub(crate) name: String,
    pub(crate) mode: u32,
    pub(crate) user_id: u64,
    pub(crate) group_id: u64,
    pub(crate) size: u64,
    pub(crate) mod_time: u64,
    pub(crate) link_flag: u8,
    pub(crate) link_name: String,
    pub(crate) magic: String,
    pub(crate) user_name: String,
    pub(crate) group_name: String,
    pub(crate) dev_major: u32,
    pub(crate) dev_minor: u32,
    file: Option<FileRef>,
}

impl Default for TarEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            mode: DEFAULT_FILE_MODE,
            user_id: 0,
            group_id: 0,
            size: 0,
            mod_time: 0,
            link_flag: LF_NORMAL,
            link_name: String::new(),
            magic: TMAGIC.to_owned(),
            user_name: String::new(),
            group_name: String::new(),
            dev_major: 0,
            dev_minor: 0,
            file: None,
        }
    }
}

impl TarEntry {
    /// Create an entry from a name, stripping leading slashes.
    ///
    /// A name ending in `/` becomes a directory entry. The modification time
    /// is set to now.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_platform(name, false, &Platform::current())
    }

    /// Create an entry from a name, optionally keeping leading slashes.
    #[must_use]
    pub fn new_preserving(name: &str, preserve_leading_slashes: bool) -> Self {
        Self::with_platform(name, preserve_leading_slashes, &Platform::current())
    }

    /// Create an entry from a name normalized for `platform`.
    #[must_use]
    pub fn with_platform(
        name: &str,
        preserve_leading_slashes: bool,
        platform: &Platform,
    ) -> Self {
        let name = normalize_file_name(name, preserve_leading_slashes, platform);
        let is_dir = name.ends_with('/');

        Self {
            name,
            mode: if is_dir { DEFAULT_DIR_MODE } else { DEFAULT_FILE_MODE },
            link_flag: if is_dir { LF_DIR } else { LF_NORMAL },
            mod_time: now_secs(),
            ..Self::default()
        }
    }

    /// Create an entry from a name with an explicit link flag.
    ///
    /// A [`LF_GNUTYPE_LONGNAME`] flag also selects the GNU magic.
    #[must_use]
    pub fn with_link_flag(name: &str, link_flag: u8) -> Self {
        let mut entry = Self::new(name);
        entry.link_flag = link_flag;
        if link_flag == LF_GNUTYPE_LONGNAME {
            entry.magic = GNU_TMAGIC.to_owned();
        }
        entry
    }

    /// Create an entry for a file or directory on disk.
    ///
    /// Directories get a trailing `/`, directory mode and size 0. Files get
    /// the file mode and their length. The path is kept so
    /// [`TarEntry::is_directory`] and [`TarEntry::directory_entries`] consult
    /// the filesystem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_platform(path, &Platform::current())
    }

    /// Create an entry for a file on disk, normalizing its name for `platform`.
    pub fn from_path_with_platform(
        path: impl AsRef<Path>,
        platform: &Platform,
    ) -> Result<Self> {
        let info = fs::stat_path(path.as_ref())?;
        let mut name = normalize_file_name(&info.path.to_string_lossy(), false, platform);

        let mut entry = if info.is_dir {
            if !name.ends_with('/') {
                name.push('/');
            }
            Self {
                mode: DEFAULT_DIR_MODE,
                link_flag: LF_DIR,
                size: 0,
                ..Self::default()
            }
        } else {
            Self {
                mode: DEFAULT_FILE_MODE,
                link_flag: LF_NORMAL,
                size: info.len,
                ..Self::default()
            }
        };
        entry.name = name;
        entry.mod_time = info.modified;
        entry.file = Some(FileRef {
            path: info.path,
            platform: *platform,
        });
        Ok(entry)
    }

    /// Decode an entry from a header block.
    ///
    /// The checksum is not verified.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntryError::InsufficientData`] if `bytes` is shorter
    /// than [`HEADER_SIZE`].
    pub fn from_header_bytes(bytes: &[u8]) -> Result<Self> {
        decode_header(bytes)
    }

    /// Write this entry's header into `block`.
    pub fn write_entry_header(&self, block: &mut [u8; HEADER_SIZE]) {
        encode_header(self, block);
    }

    /// Encode this entry's header into a new block.
    #[must_use]
    pub fn to_header_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut block = [0u8; HEADER_SIZE];
        encode_header(self, &mut block);
        block
    }

    /// Whether this entry is a directory.
    ///
    /// For an entry built from a path the filesystem decides. Otherwise the
    /// entry is a directory if its link flag says so or its name ends in `/`.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        if let Some(file) = &self.file {
            return fs::is_dir(&file.path);
        }
        self.link_flag == LF_DIR || self.name.ends_with('/')
    }

    /// Entries for the immediate children of this entry's directory.
    ///
    /// Only entries built from a path that is currently a directory have
    /// children; every other entry returns an empty list. Each call lists the
    /// directory afresh.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntryError::Io`] if listing the directory or reading
    /// a child fails.
    pub fn directory_entries(&self) -> Result<Vec<TarEntry>> {
        let Some(file) = &self.file else {
            return Ok(Vec::new());
        };
        if !fs::is_dir(&file.path) {
            return Ok(Vec::new());
        }

        fs::list_dir(&file.path)?
            .into_iter()
            .map(|child| Self::from_path_with_platform(file.path.join(child), &file.platform))
            .collect()
    }

    /// Whether `desc` is a descendant of this entry.
    ///
    /// This is a plain string prefix test on the names, not a path-segment
    /// test: `"ab"` counts as an ancestor of `"abc"`.
    #[must_use]
    pub fn is_descendant(&self, desc: &TarEntry) -> bool {
        desc.name.starts_with(&self.name)
    }

    /// Whether this is a GNU long name entry.
    #[must_use]
    pub fn is_gnu_long_name_entry(&self) -> bool {
        self.link_flag == LF_GNUTYPE_LONGNAME && self.name == GNU_LONGLINK
    }

    /// Compare with a value of any type.
    ///
    /// Anything that is not a `TarEntry` compares unequal.
    #[must_use]
    pub fn eq_dyn(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<TarEntry>().is_some_and(|it| self == it)
    }

    /// The entry's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the entry's name, normalizing it and stripping leading slashes.
    pub fn set_name(&mut self, name: &str) {
        self.name = normalize_file_name(name, false, &Platform::current());
    }

    /// The permission and file type bits.
    #[must_use]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Set the permission and file type bits.
    pub fn set_mode(&mut self, mode: u32) {
        self.mode = mode;
    }

    #[must_use]
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn set_user_id(&mut self, user_id: u64) {
        self.user_id = user_id;
    }

    #[must_use]
    pub fn group_id(&self) -> u64 {
        self.group_id
    }

    pub fn set_group_id(&mut self, group_id: u64) {
        self.group_id = group_id;
    }

    /// Set both the owner user and group ids.
    pub fn set_ids(&mut self, user_id: u64, group_id: u64) {
        self.user_id = user_id;
        self.group_id = group_id;
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn set_user_name(&mut self, user_name: &str) {
        self.user_name = user_name.to_owned();
    }

    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn set_group_name(&mut self, group_name: &str) {
        self.group_name = group_name.to_owned();
    }

    /// Set both the owner user and group names.
    pub fn set_names(&mut self, user_name: &str, group_name: &str) {
        self.set_user_name(user_name);
        self.set_group_name(group_name);
    }

    /// Content length in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = size;
    }

    /// Modification time in seconds since the Unix epoch.
    #[must_use]
    pub fn mod_time(&self) -> u64 {
        self.mod_time
    }

    /// Set the modification time in seconds since the Unix epoch.
    pub fn set_mod_time(&mut self, secs: u64) {
        self.mod_time = secs;
    }

    /// Modification time as a [`SystemTime`].
    #[must_use]
    pub fn modified(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.mod_time)
    }

    /// Set the modification time, dropping sub-second precision.
    ///
    /// Times before the Unix epoch are stored as 0.
    pub fn set_modified(&mut self, time: SystemTime) {
        self.mod_time = time
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
    }

    /// The raw link flag byte.
    #[must_use]
    pub fn link_flag(&self) -> u8 {
        self.link_flag
    }

    /// Set the raw link flag byte. The magic is left unchanged.
    pub fn set_link_flag(&mut self, link_flag: u8) {
        self.link_flag = link_flag;
    }

    /// The link flag interpreted as an [`EntryType`].
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        EntryType::from_byte(self.link_flag)
    }

    /// Target of a link entry, empty for other entries.
    #[must_use]
    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    pub fn set_link_name(&mut self, link_name: &str) {
        self.link_name = link_name.to_owned();
    }

    /// The format signature, [`TMAGIC`] or [`GNU_TMAGIC`].
    #[must_use]
    pub fn magic(&self) -> &str {
        &self.magic
    }

    pub fn set_magic(&mut self, magic: &str) {
        self.magic = magic.to_owned();
    }

    #[must_use]
    pub fn dev_major(&self) -> u32 {
        self.dev_major
    }

    pub fn set_dev_major(&mut self, dev_major: u32) {
        self.dev_major = dev_major;
    }

    #[must_use]
    pub fn dev_minor(&self) -> u32 {
        self.dev_minor
    }

    pub fn set_dev_minor(&mut self, dev_minor: u32) {
        self.dev_minor = dev_minor;
    }

    /// The path this entry was built from, if any.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }
}

impl PartialEq for TarEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TarEntry {}

impl Hash for TarEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, fs as stdfs};

    use super::*;
    use crate::entry_type::{LF_OLDNORM, LF_SYMLINK};

    #[test]
    fn test_new_file_defaults() {
        let entry = TarEntry::new("/abs/file.txt");
        assert_eq!(entry.name(), "abs/file.txt");
        assert_eq!(entry.mode(), DEFAULT_FILE_MODE);
        assert_eq!(entry.link_flag(), LF_NORMAL);
        assert_eq!(entry.magic(), TMAGIC);
        assert_eq!(entry.size(), 0);
        assert_eq!(entry.user_id(), 0);
        assert_eq!(entry.group_id(), 0);
        assert_eq!(entry.user_name(), "");
        assert_eq!(entry.group_name(), "");
        assert_eq!(entry.link_name(), "");
        assert_eq!(entry.dev_major(), 0);
        assert_eq!(entry.dev_minor(), 0);
        assert!(entry.mod_time() > 0);
        assert!(entry.file().is_none());
    }

    #[test]
    fn test_new_directory_defaults() {
        let entry = TarEntry::new("a/");
        assert_eq!(entry.mode(), DEFAULT_DIR_MODE);
        assert_eq!(entry.link_flag(), LF_DIR);
        assert!(entry.is_directory());
    }

    #[test]
    fn test_new_preserving_leading_slashes() {
        let entry = TarEntry::new_preserving("/etc/hosts", true);
        assert_eq!(entry.name(), "/etc/hosts");
        let entry = TarEntry::new_preserving("/etc/hosts", false);
        assert_eq!(entry.name(), "etc/hosts");
    }

    #[test]
    fn test_with_platform() {
        let entry = TarEntry::with_platform(r"C:\temp\dir\", false, &Platform::windows());
        assert_eq!(entry.name(), "temp/dir/");
        assert!(entry.is_directory());
    }

    #[test]
    fn test_directory_by_link_flag() {
        let entry = TarEntry::with_link_flag("a", LF_DIR);
        assert!(entry.is_directory());
        assert_eq!(entry.magic(), TMAGIC);
    }

    #[test]
    fn test_not_directory() {
        assert!(!TarEntry::new("a").is_directory());
        assert!(!TarEntry::with_link_flag("a", LF_SYMLINK).is_directory());
    }

    #[test]
    fn test_name_slash_overrides_link_flag() {
        let entry = TarEntry::with_link_flag("a/", LF_OLDNORM);
        assert!(entry.is_directory());
    }

    #[test]
    fn test_gnu_long_name_selects_gnu_magic() {
        let entry = TarEntry::with_link_flag(GNU_LONGLINK, LF_GNUTYPE_LONGNAME);
        assert_eq!(entry.magic(), GNU_TMAGIC);
        assert!(entry.is_gnu_long_name_entry());

        let other = TarEntry::with_link_flag("something", LF_GNUTYPE_LONGNAME);
        assert!(!other.is_gnu_long_name_entry());
    }

    #[test]
    fn test_set_link_flag_keeps_magic() {
        let mut entry = TarEntry::new("x");
        entry.set_link_flag(LF_GNUTYPE_LONGNAME);
        assert_eq!(entry.magic(), TMAGIC);
        assert_eq!(entry.entry_type(), EntryType::GnuLongName);
    }

    #[test]
    fn test_is_descendant() {
        let parent = TarEntry::new("a/");
        let child = TarEntry::new("a/b");
        assert!(parent.is_descendant(&child));
        assert!(!child.is_descendant(&parent));

        // Plain prefix match, not segment aware
        let ab = TarEntry::new("ab");
        let abc = TarEntry::new("abc");
        assert!(ab.is_descendant(&abc));
        assert!(ab.is_descendant(&ab));
    }

    #[test]
    fn test_equality_by_name() {
        let mut a = TarEntry::new("same");
        let mut b = TarEntry::new("same");
        a.set_size(1);
        a.set_mode(0o100755);
        b.set_size(2);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);

        assert_ne!(TarEntry::new("one"), TarEntry::new("two"));
    }

    #[test]
    fn test_eq_dyn() {
        let entry = TarEntry::new("x");
        assert!(entry.eq_dyn(&TarEntry::new("x")));
        assert!(!entry.eq_dyn(&TarEntry::new("y")));
        assert!(!entry.eq_dyn(&"x"));
        assert!(!entry.eq_dyn(&42u32));
    }

    #[test]
    fn test_setters() {
        let mut entry = TarEntry::new("x");
        entry.set_name("//renamed");
        entry.set_ids(1000, 100);
        entry.set_names("alice", "staff");
        entry.set_link_name("target");
        entry.set_dev_major(8);
        entry.set_dev_minor(1);
        entry.set_magic(GNU_TMAGIC);

        assert_eq!(entry.name(), "renamed");
        assert_eq!(entry.user_id(), 1000);
        assert_eq!(entry.group_id(), 100);
        assert_eq!(entry.user_name(), "alice");
        assert_eq!(entry.group_name(), "staff");
        assert_eq!(entry.link_name(), "target");
        assert_eq!(entry.dev_major(), 8);
        assert_eq!(entry.dev_minor(), 1);
        assert_eq!(entry.magic(), GNU_TMAGIC);
    }

    #[test]
    fn test_modified_time() {
        let mut entry = TarEntry::new("x");
        entry.set_modified(UNIX_EPOCH + Duration::from_millis(1_700_000_000_999));
        assert_eq!(entry.mod_time(), 1_700_000_000);
        assert_eq!(entry.modified(), UNIX_EPOCH + Duration::from_secs(1_700_000_000));

        entry.set_modified(UNIX_EPOCH - Duration::from_secs(5));
        assert_eq!(entry.mod_time(), 0);
    }

    #[test]
    fn test_from_path_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        stdfs::write(&path, b"hello").unwrap();

        let entry = TarEntry::from_path(&path).unwrap();
        let expected = normalize_file_name(&path.to_string_lossy(), false, &Platform::unix());
        assert_eq!(entry.name(), expected);
        assert!(!entry.name().starts_with('/'));
        assert_eq!(entry.mode(), DEFAULT_FILE_MODE);
        assert_eq!(entry.link_flag(), LF_NORMAL);
        assert_eq!(entry.size(), 5);
        assert!(entry.mod_time() > 0);
        assert_eq!(entry.file(), Some(path.as_path()));
        assert!(!entry.is_directory());
        assert!(entry.directory_entries().unwrap().is_empty());
    }

    #[test]
    fn test_from_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let entry = TarEntry::from_path(dir.path()).unwrap();
        assert!(entry.name().ends_with('/'));
        assert_eq!(entry.mode(), DEFAULT_DIR_MODE);
        assert_eq!(entry.link_flag(), LF_DIR);
        assert_eq!(entry.size(), 0);
        assert!(entry.is_directory());
    }

    #[test]
    fn test_from_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TarEntry::from_path(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_filesystem_is_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let entry = TarEntry::from_path(dir.path()).unwrap();
        assert!(entry.is_directory());

        // Name still ends in '/' and the flag still says directory, but the
        // live path is gone.
        let path = dir.path().to_path_buf();
        dir.close().unwrap();
        assert!(entry.name().ends_with('/'));
        assert!(!entry.is_directory());
        assert!(!path.exists());
        assert!(entry.directory_entries().unwrap().is_empty());
    }

    #[test]
    fn test_directory_entries() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("a.txt"), b"abc").unwrap();
        stdfs::create_dir(dir.path().join("sub")).unwrap();
        stdfs::write(dir.path().join("sub").join("nested"), b"").unwrap();

        let entry = TarEntry::from_path(dir.path()).unwrap();
        let children = entry.directory_entries().unwrap();
        assert_eq!(children.len(), 2);

        assert!(children[0].name().ends_with("/a.txt"));
        assert_eq!(children[0].size(), 3);
        assert!(!children[0].is_directory());

        assert!(children[1].name().ends_with("/sub/"));
        assert!(children[1].is_directory());

        for child in &children {
            assert!(entry.is_descendant(child));
            assert!(child.file().is_some());
        }
    }

    #[test]
    fn test_directory_entries_without_file() {
        let entry = TarEntry::new("some/dir/");
        assert!(entry.is_directory());
        assert!(entry.directory_entries().unwrap().is_empty());
    }
}
