use crate::core::fingerprint::{fingerprint, Fingerprint};
use crate::core::lock::ManifestLock;
use crate::utils::error::{MtaError, Result};
use std::path::Path;

/// Runs `edit` as one guarded read-check-modify-write cycle on `path`.
///
/// The manifest lock is held for the whole cycle and released on every exit
/// path. With `enforce_check`, the file's current fingerprint must equal
/// `expected` or the cycle is rejected before `edit` runs. `edit` performs
/// its own load, mutation and write of `path`.
pub fn modify_document<F>(
    path: &Path,
    edit: F,
    expected: Fingerprint,
    enforce_check: bool,
) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let _lock = ManifestLock::acquire(path)?;

    if enforce_check {
        let (current, exists) = fingerprint(path)?;
        if current != expected {
            tracing::warn!(
                path = %path.display(),
                expected = %expected,
                current = %current,
                exists,
                "rejecting stale modification"
            );
            return Err(MtaError::ConcurrentModificationError {
                path: path.to_path_buf(),
            });
        }
    } else {
        tracing::debug!(path = %path.display(), "fingerprint check skipped");
    }

    let outcome = edit();
    match &outcome {
        Ok(()) => tracing::debug!(path = %path.display(), "modification applied"),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "modification failed"),
    }
    outcome
}
