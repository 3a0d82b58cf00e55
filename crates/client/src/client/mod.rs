//! HTTP client for the remote gateway.

mod records;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for a spreadsheet-backed gateway deployment.
///
/// Fetches go out as `GET {endpoint}?format=json`; writes as a `POST` whose
/// body is the JSON request sent as `text/plain`.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl GatewayClient {
    /// Create a new client. Without an endpoint every call fails with
    /// `NotConfigured` and no request is made.
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Decode a response body, treating non-success statuses as errors.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(ClientError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
