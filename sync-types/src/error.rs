//! Codec errors for the JSON wire format.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur encoding or decoding wire payloads.
#[derive(Debug, Error)]
pub enum WireError {
    /// Request body serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Response body was not the expected JSON shape
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

/// Decode a JSON response body.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
    serde_json::from_slice(bytes).map_err(WireError::Deserialization)
}

/// Encode a JSON request body.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, WireError> {
    serde_json::to_vec(value).map_err(WireError::Serialization)
}
