//! Cross-process lock guarding manifest mutations.
//!
//! The lock is an advisory OS lock on a sentinel file next to the manifest,
//! never on the manifest itself, so plain readers are unaffected. Acquisition
//! is attempted once; contention is reported, not waited out.

use crate::utils::error::{MtaError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Name of the sentinel file created in the manifest's directory.
pub const LOCK_FILE_NAME: &str = "mta-lock.lock";

/// Sentinel lock path for the manifest at `target`.
pub fn lock_path_for(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(LOCK_FILE_NAME),
        _ => PathBuf::from(LOCK_FILE_NAME),
    }
}

/// A held lock on a manifest. Released on drop.
#[derive(Debug)]
pub struct ManifestLock {
    file: File,
    lock_path: PathBuf,
    target: PathBuf,
}

impl ManifestLock {
    /// Attempts to lock `target` once.
    ///
    /// Fails with `LockHeldError` naming `target` if anyone else, in this or
    /// another process, holds the lock.
    pub fn acquire(target: &Path) -> Result<Self> {
        let lock_path = lock_path_for(target);

        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| MtaError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| MtaError::WriteError {
                path: lock_path.clone(),
                source,
            })?;

        if let Err(e) = FileExt::try_lock_exclusive(&file) {
            tracing::debug!(
                lock = %lock_path.display(),
                error = %e,
                "manifest lock is held elsewhere"
            );
            return Err(MtaError::LockHeldError {
                path: target.to_path_buf(),
            });
        }

        tracing::debug!(lock = %lock_path.display(), "acquired manifest lock");
        Ok(Self {
            file,
            lock_path,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Releases the lock now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ManifestLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.lock_path.display(), error = %e, "failed to unlock manifest lock");
        } else {
            tracing::debug!(lock = %self.lock_path.display(), "released manifest lock");
        }
    }
}
