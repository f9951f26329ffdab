//! Portable entry names.
//!
//! Header names are relative paths with `/` separators. Native paths are
//! converted by stripping drive letters or volume prefixes, replacing the
//! native separator and removing leading slashes.
//!
//! The platform is passed in as a [`Platform`] value so the same path can be
//! normalized as it would be on any system.

use std::borrow::Cow;

/// Family of path syntax a platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Plain separator-delimited paths.
    Unix,
    /// Paths that may start with a drive letter such as `C:`.
    Windows,
    /// Paths that may start with a `volume:` prefix.
    Netware,
}

/// Path conventions used when normalizing native paths.
///
/// # Example
///
/// ```
/// use tar_entry::{normalize_file_name, Platform};
///
/// let windows = Platform::windows();
/// assert_eq!(normalize_file_name(r"C:\Users\me\notes.txt", false, &windows), "Users/me/notes.txt");
///
/// let unix = Platform::unix();
/// assert_eq!(normalize_file_name("/etc/hosts", false, &unix), "etc/hosts");
/// assert_eq!(normalize_file_name("/etc/hosts", true, &unix), "/etc/hosts");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Native path separator.
    pub separator: char,
    /// Path syntax family.
    pub family: OsFamily,
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl Platform {
    /// Unix-like platform: `/` separator, no prefixes.
    #[must_use]
    pub const fn unix() -> Self {
        Self {
            separator: '/',
            family: OsFamily::Unix,
        }
    }

    /// Windows: `\` separator, optional drive letter.
    #[must_use]
    pub const fn windows() -> Self {
        Self {
            separator: '\\',
            family: OsFamily::Windows,
        }
    }

    /// NetWare: `/` separator, optional `volume:` prefix.
    #[must_use]
    pub const fn netware() -> Self {
        Self {
            separator: '/',
            family: OsFamily::Netware,
        }
    }

    /// The platform this crate was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }
}

/// Convert a native path into a relative, `/`-separated entry name.
///
/// A drive letter is only removed when something follows it, so `"C:"` on its
/// own is kept. On NetWare everything up to and including the first `:` is
/// removed. Unless `preserve_leading_slashes` is set, all leading `/` are
/// stripped, which also covers UNC-style `\\server\share` paths on Windows.
#[must_use]
pub fn normalize_file_name(
    path: &str,
    preserve_leading_slashes: bool,
    platform: &Platform,
) -> String {
    let mut name = path;

    match platform.family {
        OsFamily::Windows => {
            let mut chars = name.chars();
            if let (Some(drive), Some(':'), Some(_)) = (chars.next(), chars.next(), chars.next())
            {
                if drive.is_ascii_alphabetic() {
                    name = &name[2..];
                }
            }
        }
        OsFamily::Netware => {
            if let Some(colon) = name.find(':') {
                name = &name[colon + 1..];
            }
        }
        OsFamily::Unix => {}
    }

    let name = if platform.separator == '/' {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.replace(platform.separator, "/"))
    };

    if preserve_leading_slashes {
        name.into_owned()
    } else {
        name.trim_start_matches('/').to_owned()
    }
}
