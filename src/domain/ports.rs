use crate::utils::error::Result;
use serde::Serialize;
use std::io;
use std::path::Path;

/// File-system capabilities the manifest operations depend on.
///
/// Injected so tests can substitute failing directory creation or file writes.
pub trait FileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replaces `path` with `data` so that readers see either the old or the new bytes.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Turns documents, or parts of them, into bytes.
pub trait Encoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;
}
