//! Acquire and release of edition bundles.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mag_client::ClientError;
use mag_config::StorageConfig;
use mag_core::Credential;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{ExtractError, StoreError};
use crate::extract::{EntryNameEncoding, extract_archive};
use crate::locks::PathLocks;
use crate::progress::{DownloadProgress, ProgressThrottle};
use crate::source::ArchiveSource;

/// Store-wide behaviour.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Entry-name charset when a request does not name one.
    pub default_charset: String,
    /// Clear the bundle directory again when an acquisition fails.
    ///
    /// With this off, a failed extraction can leave a non-empty directory that
    /// later counts as present.
    pub rollback_on_failure: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_charset: "UTF-8".to_string(),
            rollback_on_failure: true,
        }
    }
}

impl StoreOptions {
    #[must_use]
    pub fn from_config(storage: &StorageConfig) -> Self {
        Self {
            default_charset: storage.charset.clone(),
            rollback_on_failure: storage.rollback_on_failure,
        }
    }
}

/// What to acquire and where to put it.
#[derive(Debug, Clone)]
pub struct AcquireRequest {
    /// Bundle directory.
    pub target: PathBuf,
    pub project_domain: String,
    /// Edition path as listed by the service, e.g. `/welcome`.
    pub edition_path: String,
    /// Overrides the source's default API key.
    pub credential: Option<Credential>,
    /// Entry-name charset; falls back to [`StoreOptions::default_charset`].
    pub charset: Option<String>,
}

impl AcquireRequest {
    #[must_use]
    pub fn new(
        target: impl Into<PathBuf>,
        project_domain: impl Into<String>,
        edition_path: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            project_domain: project_domain.into(),
            edition_path: edition_path.into(),
            credential: None,
            charset: None,
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

/// Successful outcome of [`EditionStore::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// The directory was already populated; nothing was fetched.
    AlreadyPresent,
    Downloaded { bytes: u64, files: usize },
}

/// Successful outcome of [`EditionStore::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    Removed,
    /// Nothing existed at the path.
    Absent,
}

/// Owns the bundle directories it is asked to manage.
#[derive(Debug)]
pub struct EditionStore<S> {
    source: S,
    options: StoreOptions,
    locks: PathLocks,
}

impl<S: ArchiveSource> EditionStore<S> {
    pub fn new(source: S, options: StoreOptions) -> Self {
        Self {
            source,
            options,
            locks: PathLocks::new(),
        }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Make sure the edition's bundle is present in `request.target`.
    ///
    /// Creates the directory if needed. If it already has any entry the call
    /// returns [`Acquisition::AlreadyPresent`] without touching the network.
    /// Otherwise the archive is streamed into a temporary file inside the
    /// directory, `on_progress` is told how far along it is, and the archive is
    /// extracted in place and removed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Storage`] if the directory cannot be created or read
    /// - [`StoreError::Transport`] / [`StoreError::Truncated`] if the download fails
    /// - [`StoreError::Extraction`] if the charset is unknown or the archive is bad
    ///
    /// After a failed download or extraction the directory is emptied again
    /// unless [`StoreOptions::rollback_on_failure`] is off.
    pub async fn acquire<F>(
        &self,
        request: &AcquireRequest,
        mut on_progress: F,
    ) -> Result<Acquisition, StoreError>
    where
        F: FnMut(DownloadProgress) + Send,
    {
        let target = request.target.as_path();
        let _guard = self.locks.lock(target).await;

        let charset = request
            .charset
            .as_deref()
            .unwrap_or(&self.options.default_charset);
        let encoding = EntryNameEncoding::for_label(charset)?;

        tokio::fs::create_dir_all(target)
            .await
            .map_err(StoreError::storage(target))?;

        if is_present(target).await.map_err(StoreError::storage(target))? {
            debug!(target = %target.display(), "bundle already present");
            return Ok(Acquisition::AlreadyPresent);
        }

        info!(
            project = %request.project_domain,
            edition = %request.edition_path,
            target = %target.display(),
            "downloading edition"
        );
        match self.download_and_extract(request, encoding, &mut on_progress).await {
            Ok(outcome) => {
                info!(target = %target.display(), ?outcome, "edition acquired");
                Ok(outcome)
            }
            Err(error) => {
                if self.options.rollback_on_failure {
                    rollback(target).await;
                }
                Err(error)
            }
        }
    }

    /// Remove a bundle directory and everything under it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the path exists but cannot be removed.
    pub async fn release(&self, target: &Path) -> Result<Released, StoreError> {
        let _guard = self.locks.lock(target).await;

        let metadata = match tokio::fs::symlink_metadata(target).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Released::Absent),
            Err(e) => return Err(StoreError::storage(target)(e)),
        };

        let removed = if metadata.is_dir() {
            tokio::fs::remove_dir_all(target).await
        } else {
            tokio::fs::remove_file(target).await
        };
        match removed {
            Ok(()) => {
                info!(target = %target.display(), "edition released");
                Ok(Released::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Released::Absent),
            Err(e) => Err(StoreError::storage(target)(e)),
        }
    }

    async fn download_and_extract<F>(
        &self,
        request: &AcquireRequest,
        encoding: EntryNameEncoding,
        on_progress: &mut F,
    ) -> Result<Acquisition, StoreError>
    where
        F: FnMut(DownloadProgress) + Send,
    {
        let target = request.target.as_path();
        let mut resp = self
            .source
            .fetch_archive(
                &request.project_domain,
                &request.edition_path,
                request.credential.as_ref(),
            )
            .await?;
        let total = announced_length(&resp);

        let archive = tempfile::Builder::new()
            .prefix(".edition-")
            .suffix(".zip.part")
            .tempfile_in(target)
            .map_err(StoreError::storage(target))?;
        let archive_path = archive.path().to_path_buf();
        let mut file = tokio::fs::File::from_std(
            archive
                .as_file()
                .try_clone()
                .map_err(StoreError::storage(&archive_path))?,
        );

        let mut received = 0u64;
        let mut throttle = ProgressThrottle::default();
        while let Some(chunk) = resp.chunk().await.map_err(ClientError::from)? {
            file.write_all(&chunk)
                .await
                .map_err(StoreError::storage(&archive_path))?;
            received += chunk.len() as u64;

            let progress = DownloadProgress { received, total };
            if throttle.should_emit(progress) {
                debug!(received, total, percent = progress.percent(), "download progress");
                on_progress(progress);
            }
        }
        file.flush()
            .await
            .map_err(StoreError::storage(&archive_path))?;
        drop(file);

        if let Some(expected) = total.filter(|expected| *expected != received) {
            return Err(StoreError::Truncated { received, expected });
        }
        let done = DownloadProgress { received, total };
        if throttle.needs_final(done) {
            on_progress(done);
        }
        debug!(bytes = received, archive = %archive_path.display(), "archive saved");

        let destination = target.to_path_buf();
        let files = tokio::task::spawn_blocking(move || {
            let result = extract_archive(archive.path(), &destination, encoding);
            // Dropping the handle deletes the temporary archive.
            drop(archive);
            result
        })
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))??;

        Ok(Acquisition::Downloaded {
            bytes: received,
            files,
        })
    }
}

/// Length from the `Content-Length` header, else the body's exact size hint.
fn announced_length(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| resp.content_length())
}

/// `true` if `path` is a directory with at least one entry.
///
/// # Errors
///
/// Returns the I/O error if `path` exists but cannot be listed.
pub async fn is_present(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::read_dir(path).await {
        Ok(mut entries) => Ok(entries.next_entry().await?.is_some()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Empty `target` after a failed acquisition, keeping the directory itself.
async fn rollback(target: &Path) {
    match clear_dir(target).await {
        Ok(()) => debug!(target = %target.display(), "rolled back partial bundle"),
        Err(error) => warn!(
            target = %target.display(),
            %error,
            "rollback failed; bundle directory may hold partial content"
        ),
    }
}

async fn clear_dir(dir: &Path) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(&path).await?;
        } else {
            tokio::fs::remove_file(&path).await?;
        }
    }
    Ok(())
}
