//! Store error types.

use std::path::PathBuf;

use mag_client::ClientError;
use thiserror::Error;

/// Errors raised while acquiring or releasing a bundle.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The archive could not be fetched (network, HTTP status, interrupted body).
    #[error("download failed: {0}")]
    Transport(#[from] ClientError),

    /// The body ended before the advertised length.
    #[error("download truncated: received {received} of {expected} bytes")]
    Truncated { received: u64, expected: u64 },

    /// Creating, listing, writing, or deleting local files failed.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive was downloaded but could not be unpacked.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}

impl StoreError {
    pub(crate) fn storage(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Storage { path, source }
    }

    /// `true` when the failure was a missing network connection.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connectivity())
    }
}

/// Errors raised while unpacking an archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported charset '{0}'")]
    UnsupportedCharset(String),

    #[error("malformed archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An entry is absolute or climbs out of the bundle directory.
    #[error("archive entry escapes the bundle directory: {0}")]
    UnsafeEntry(String),

    #[error("archive contains no entries")]
    Empty,

    #[error("I/O error while extracting: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Task(String),
}
