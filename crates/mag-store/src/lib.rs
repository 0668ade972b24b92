//! # mag-store
//!
//! Edition bundle lifecycle on local storage.
//!
//! An edition's bundle lives in a caller-chosen directory. A directory with at
//! least one entry counts as present; an empty or missing one as absent.
//! [`EditionStore::acquire`] downloads the edition's zip archive and extracts
//! it when the bundle is absent, and [`EditionStore::release`] removes it.
//!
//! Calls on the same directory are serialized: at most one acquisition is in
//! flight per path, and a release never overlaps an acquisition.

mod error;
mod extract;
mod locks;
mod progress;
mod source;
mod store;

pub use error::{ExtractError, StoreError};
pub use extract::EntryNameEncoding;
pub use locks::{PathGuard, PathLocks};
pub use progress::DownloadProgress;
pub use source::ArchiveSource;
pub use store::{
    AcquireRequest, Acquisition, EditionStore, Released, StoreOptions, is_present,
};
