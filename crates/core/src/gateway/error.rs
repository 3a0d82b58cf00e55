use thiserror::Error;

/// Errors that can occur when talking to the remote gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No endpoint was configured, so no request was made.
    #[error("Gateway endpoint is not configured")]
    NotConfigured,
    /// Network failure or a non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The response body could not be parsed.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The gateway answered with an error envelope.
    #[error("Rejected by gateway: {0}")]
    Rejected(String),
    /// A request payload could not be built.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl GatewayError {
    /// The message to show the user, if the gateway supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected(message) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
