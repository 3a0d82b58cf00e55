//! Client error types.

use lifelines_core::cache::CacheError;
use lifelines_core::gateway::GatewayError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for GatewayError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Json(e) => GatewayError::MalformedResponse(e.to_string()),
            ClientError::Request(e) if e.is_decode() => {
                GatewayError::MalformedResponse(e.to_string())
            }
            other => GatewayError::Transport(other.to_string()),
        }
    }
}
