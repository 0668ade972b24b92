//! # mag-offline
//!
//! Serves an acquired edition bundle over a loopback HTTP server so a local
//! renderer can load it.
//!
//! The server is rooted at a directory (usually the parent of all bundles),
//! answers `GET`/`HEAD` with static files, keeps connections alive between
//! requests, and runs until its [`OfflineServer`] handle is shut down or
//! dropped.

mod error;
mod files;
mod server;

use std::path::Path;

use mag_config::OfflineConfig;
use tracing::{info, warn};

pub use error::OfflineError;
pub use server::OfflineServer;

/// How the server binds and how many requests it handles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeOptions {
    /// Loopback port; `0` picks a free one.
    pub port: u16,
    pub workers: usize,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self::from_config(&OfflineConfig::default())
    }
}

impl ServeOptions {
    #[must_use]
    pub fn from_config(offline: &OfflineConfig) -> Self {
        Self {
            port: offline.port,
            workers: offline.workers,
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Start serving `root` on the loopback interface and check that `bundle`
/// holds content.
///
/// # Errors
///
/// - [`OfflineError::Server`] if the port cannot be bound
/// - [`OfflineError::BundleNotFound`] if `bundle` is missing or empty; the
///   error carries the running server
/// - [`OfflineError::Storage`] if `bundle` exists but cannot be listed
pub async fn serve_edition_offline(
    root: &Path,
    bundle: &Path,
    options: &ServeOptions,
) -> Result<OfflineServer, OfflineError> {
    let server = OfflineServer::start(root.to_path_buf(), *options).await?;
    info!(url = %server.url(), root = %root.display(), "offline server started");

    match mag_store::is_present(bundle).await {
        Ok(true) => Ok(server),
        Ok(false) => {
            warn!(bundle = %bundle.display(), "bundle missing; server left running");
            Err(OfflineError::BundleNotFound {
                bundle: bundle.to_path_buf(),
                server: Box::new(server),
            })
        }
        Err(source) => Err(OfflineError::Storage {
            path: bundle.to_path_buf(),
            source,
        }),
    }
}
