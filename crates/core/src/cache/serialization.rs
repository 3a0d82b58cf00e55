//! Pure functions for turning cached values into bytes and back.
//!
//! Collections are stored as JSON arrays in the same camelCase shape the
//! gateway uses. The last sync time is stored as decimal epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a collection of records to JSON bytes.
pub fn serialize_collection<R: Serialize>(records: &[R]) -> Result<Vec<u8>> {
    serde_json::to_vec(records).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a collection of records.
pub fn deserialize_collection<R: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<R>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Encodes a timestamp as decimal epoch milliseconds.
pub fn serialize_timestamp(at: DateTime<Utc>) -> Vec<u8> {
    at.timestamp_millis().to_string().into_bytes()
}

pub fn deserialize_timestamp(bytes: &[u8]) -> Result<DateTime<Utc>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;
    let millis: i64 = text
        .trim()
        .parse()
        .map_err(|_| SerializationError::DeserializeFailed(format!("not a timestamp: {text}")))?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        SerializationError::DeserializeFailed(format!("timestamp out of range: {millis}"))
    })
}
