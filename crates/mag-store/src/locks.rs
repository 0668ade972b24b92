//! Per-path async lock table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per bundle directory, created on demand.
///
/// Entries are removed when the last holder or waiter lets go, so the table
/// only grows with the number of paths in use at the same time.
#[derive(Debug, Default)]
pub struct PathLocks {
    table: Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

/// Exclusive access to one path. Released on drop.
#[derive(Debug)]
pub struct PathGuard<'a> {
    locks: &'a PathLocks,
    key: PathBuf,
    guard: Option<OwnedMutexGuard<()>>,
}

impl PathLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `path` is free and take it.
    ///
    /// Relative paths are resolved against the current directory, so `a/b` and
    /// `./a/b` share a lock.
    pub async fn lock(&self, path: &Path) -> PathGuard<'_> {
        let key = lock_key(path);
        let mutex = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(key.clone()).or_default())
        };
        let guard = mutex.lock_owned().await;
        PathGuard {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of paths currently locked or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut table = self
            .locks
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the table itself still references the mutex: nobody is waiting.
        if table
            .get(&self.key)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            table.remove(&self.key);
        }
    }
}

fn lock_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn table_is_pruned_after_release() {
        let locks = PathLocks::new();
        {
            let _a = locks.lock(Path::new("/tmp/a")).await;
            let _b = locks.lock(Path::new("/tmp/b")).await;
            assert_eq!(locks.len(), 2);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn same_path_is_exclusive() {
        let locks = PathLocks::new();
        let held = locks.lock(Path::new("/tmp/edition")).await;

        let blocked =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(Path::new("/tmp/edition")))
                .await;
        assert!(blocked.is_err(), "second lock should wait");

        drop(held);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(Path::new("/tmp/edition")))
                .await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn different_paths_do_not_block() {
        let locks = PathLocks::new();
        let _held = locks.lock(Path::new("/tmp/one")).await;
        let other =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(Path::new("/tmp/two"))).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn relative_spellings_share_a_lock() {
        let locks = PathLocks::new();
        let _held = locks.lock(Path::new("bundle/x")).await;
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(Path::new("./bundle/x")))
                .await;
        assert!(blocked.is_err());
    }
}
