//! Cross-cutting error types for magkit.
//!
//! Transport, storage, and server failures are defined in their respective
//! crates (`ClientError`, `StoreError`, `OfflineError`).

use thiserror::Error;

/// Errors that can be raised by any magkit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
