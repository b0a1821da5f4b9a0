//! YAML/JSON codec for the manifest model.
//!
//! The manifest itself is YAML; JSON is only accepted for caller-supplied
//! fragments (a whole document, module or resource).

use crate::domain::model::{Document, Module, Resource};
use crate::utils::error::{MtaError, Result};
use serde::de::DeserializeOwned;

const IN_MEMORY_ORIGIN: &str = "<input>";

/// Parses manifest bytes.
pub fn deserialize(bytes: &[u8]) -> Result<Document> {
    deserialize_from(IN_MEMORY_ORIGIN, bytes)
}

/// Same as [`deserialize`], naming `origin` in the error.
pub fn deserialize_from(origin: &str, bytes: &[u8]) -> Result<Document> {
    serde_yaml::from_slice(bytes).map_err(|source| MtaError::MalformedDocumentError {
        origin: origin.to_string(),
        source,
    })
}

pub fn serialize(document: &Document) -> Result<Vec<u8>> {
    serde_yaml::to_string(document)
        .map(String::into_bytes)
        .map_err(|e| MtaError::SerializationError {
            message: e.to_string(),
        })
}

/// Parses a JSON fragment into any part of the model.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

impl Document {
    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

impl Module {
    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}

impl Resource {
    pub fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }
}
