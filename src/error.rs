//! Error types for entry construction and header decoding.

use std::path::PathBuf;

use thiserror::Error;

use crate::HEADER_SIZE;

/// Errors that can occur when building or decoding tar entries.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The provided data is too short to contain a header block.
    #[error("insufficient data: expected {HEADER_SIZE} bytes, got {0}")]
    InsufficientData(usize),

    /// Reading filesystem attributes or a directory listing failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EntryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        Self::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type for entry operations.
pub type Result<T> = std::result::Result<T, EntryError>;
