use std::path::PathBuf;

use thiserror::Error;

use crate::server::OfflineServer;

#[derive(Debug, Error)]
pub enum OfflineError {
    /// The content server could not bind or start.
    #[error("offline server failed: {0}")]
    Server(String),

    /// The server is up but the bundle directory is missing or empty.
    ///
    /// The running server is handed back so the caller decides when to stop it.
    #[error("edition bundle not found at {}", bundle.display())]
    BundleNotFound {
        bundle: PathBuf,
        server: Box<OfflineServer>,
    },

    #[error("cannot inspect {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OfflineError {
    /// Take the still-running server out of a [`OfflineError::BundleNotFound`].
    #[must_use]
    pub fn into_server(self) -> Option<OfflineServer> {
        match self {
            Self::BundleNotFound { server, .. } => Some(*server),
            _ => None,
        }
    }
}
