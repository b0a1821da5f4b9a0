use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MtaError {
    #[error("could not find the \"{}\" file", path.display())]
    FileNotFoundError { path: PathBuf },

    #[error("could not read the \"{}\" file: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write the \"{}\" file: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON input: {0}")]
    MalformedInputError(#[from] serde_json::Error),

    #[error("could not parse the \"{origin}\" content as an MTA descriptor: {source}")]
    MalformedDocumentError {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("serialization failed: {message}")]
    SerializationError { message: String },

    #[error("failed to lock the \"{}\" file for modification", path.display())]
    LockHeldError { path: PathBuf },

    #[error("could not update the \"{}\" file; it was modified by another process", path.display())]
    ConcurrentModificationError { path: PathBuf },

    #[error("the \"{name}\" {kind} was not found")]
    EntityNotFoundError { kind: String, name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Document,
    Concurrency,
    Io,
    Config,
}

impl MtaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MtaError::MalformedInputError(_) | MtaError::EntityNotFoundError { .. } => {
                ErrorCategory::Input
            }
            MtaError::MalformedDocumentError { .. } | MtaError::SerializationError { .. } => {
                ErrorCategory::Document
            }
            MtaError::LockHeldError { .. } | MtaError::ConcurrentModificationError { .. } => {
                ErrorCategory::Concurrency
            }
            MtaError::FileNotFoundError { .. }
            | MtaError::ReadError { .. }
            | MtaError::WriteError { .. } => ErrorCategory::Io,
            MtaError::ConfigError { .. } | MtaError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// Maps a failed read to `FileNotFoundError` when the file is simply absent.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            MtaError::FileNotFoundError { path }
        } else {
            MtaError::ReadError { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MtaError::FileNotFoundError { .. })
    }
}

pub type Result<T> = std::result::Result<T, MtaError>;
