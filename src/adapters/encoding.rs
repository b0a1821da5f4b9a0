use crate::domain::ports::Encoder;
use crate::utils::error::{MtaError, Result};
use serde::Serialize;

/// Encodes values as YAML, the manifest's on-disk format.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl Encoder for YamlEncoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| MtaError::SerializationError {
                message: e.to_string(),
            })
    }
}

/// Pretty-printed JSON, for callers that consume query results programmatically.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|e| MtaError::SerializationError {
            message: e.to_string(),
        })
    }
}
