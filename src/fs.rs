//! Reading the filesystem facts an entry is built from.
//!
//! An entry built from a live path only ever needs the path itself, whether it
//! is a directory, its length, its modification time and the names of its
//! immediate children. Nothing here is cached; every call goes to the
//! filesystem.

use std::{
    ffi::{OsStr, OsString},
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
};

use log::debug;
use rustix::fs::{openat, stat, Dir, FileType, Mode, OFlags, CWD};

use crate::error::{EntryError, Result};

/// Attributes of a filesystem object, as read by [`stat_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// The path that was examined.
    pub path: PathBuf,
    /// Whether the path (after following symlinks) is a directory.
    pub is_dir: bool,
    /// Length in bytes.
    pub len: u64,
    /// Last modification time in whole seconds since the Unix epoch.
    pub modified: u64,
}

/// Read the attributes of `path`, following symlinks.
pub fn stat_path(path: &Path) -> Result<FileInfo> {
    let buf = stat(path).map_err(|e| EntryError::io(path, e))?;

    Ok(FileInfo {
        path: path.to_path_buf(),
        is_dir: FileType::from_raw_mode(buf.st_mode) == FileType::Directory,
        len: u64::try_from(buf.st_size).unwrap_or(0),
        modified: u64::try_from(buf.st_mtime).unwrap_or(0),
    })
}

/// Whether `path` currently exists and is a directory.
///
/// Any error reading the path counts as "not a directory".
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    stat(path).is_ok_and(|buf| FileType::from_raw_mode(buf.st_mode) == FileType::Directory)
}

/// List the names of the immediate children of the directory at `path`.
///
/// `.` and `..` are skipped and the names are returned sorted.
pub fn list_dir(path: &Path) -> Result<Vec<OsString>> {
    let fd = openat(
        CWD,
        path,
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
        Mode::empty(),
    )
    .map_err(|e| EntryError::io(path, e))?;

    let mut names = Vec::new();
    for item in Dir::read_from(&fd).map_err(|e| EntryError::io(path, e))? {
        let entry = item.map_err(|e| EntryError::io(path, e))?;
        let name = OsStr::from_bytes(entry.file_name().to_bytes());

        if name == "." || name == ".." {
            continue;
        }
        names.push(name.to_os_string());
    }
    names.sort();

    debug!("listed {} children of {}", names.len(), path.display());
    Ok(names)
}
