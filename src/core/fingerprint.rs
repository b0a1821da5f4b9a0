use crate::utils::error::{MtaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Content token used to detect that a manifest changed between read and write.
///
/// Not an integrity check: collisions are possible, only unlikely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Token reported for a file that does not exist.
    pub const ZERO: Fingerprint = Fingerprint(0);

    pub fn of_bytes(data: &[u8]) -> Self {
        let digest = blake3::hash(data);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest.as_bytes()[..8]);
        Fingerprint(u64::from_le_bytes(prefix))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Fingerprint(value)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Fingerprint)
    }
}

/// Fingerprints the current content of `path`.
///
/// Returns the token and whether the file exists. A missing file is not an
/// error: it yields `(Fingerprint::ZERO, false)`.
pub fn fingerprint(path: &Path) -> Result<(Fingerprint, bool)> {
    match std::fs::read(path) {
        Ok(data) => Ok((Fingerprint::of_bytes(&data), true)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((Fingerprint::ZERO, false)),
        Err(source) => Err(MtaError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_zero() {
        let temp_dir = TempDir::new().unwrap();
        let (token, exists) = fingerprint(&temp_dir.path().join("mta.yaml")).unwrap();
        assert_eq!(token, Fingerprint::ZERO);
        assert!(!exists);
    }

    #[test]
    fn test_identical_content_identical_token() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.yaml");
        let b = temp_dir.path().join("b.yaml");
        std::fs::write(&a, "ID: app\n").unwrap();
        std::fs::write(&b, "ID: app\n").unwrap();

        let (token_a, exists) = fingerprint(&a).unwrap();
        let (token_b, _) = fingerprint(&b).unwrap();
        assert!(exists);
        assert_eq!(token_a, token_b);
        assert_eq!(token_a, fingerprint(&a).unwrap().0);
    }

    #[test]
    fn test_single_byte_change_changes_token() {
        assert_ne!(
            Fingerprint::of_bytes(b"version: 1.0.0"),
            Fingerprint::of_bytes(b"version: 1.0.1")
        );
        // An existing empty file is distinguishable from a missing one.
        assert_ne!(Fingerprint::of_bytes(b""), Fingerprint::ZERO);
    }

    #[test]
    fn test_parse_and_display() {
        let token = Fingerprint::of_bytes(b"ID: app\n");
        let parsed: Fingerprint = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert!("not-a-number".parse::<Fingerprint>().is_err());
    }
}
