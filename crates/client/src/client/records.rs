//! Snapshot fetch and write actions.

use async_trait::async_trait;
use lifelines_core::gateway::{
    self, Gateway, GatewayError, GatewayRequest, GatewayResponse, Snapshot,
};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::GatewayClient;
use crate::error::Result;

/// Content type of write requests. A plain-text body keeps browsers and
/// script hosts from issuing a CORS preflight.
const WRITE_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

impl GatewayClient {
    /// Fetch both collections.
    pub async fn get_snapshot(&self, endpoint: &str) -> Result<Snapshot> {
        let response = self
            .client
            .get(endpoint)
            .query(&[("format", "json")])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Send a write action and return the response envelope.
    pub async fn post_action(
        &self,
        endpoint: &str,
        request: &GatewayRequest,
    ) -> Result<GatewayResponse> {
        let body = serde_json::to_string(request)?;
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, WRITE_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    fn require_endpoint(&self) -> gateway::Result<&str> {
        self.endpoint().ok_or(GatewayError::NotConfigured)
    }
}

#[async_trait]
impl Gateway for GatewayClient {
    async fn fetch_all(&self) -> gateway::Result<Snapshot> {
        let endpoint = self.require_endpoint()?;
        tracing::debug!(endpoint, "fetching snapshot");
        Ok(self.get_snapshot(endpoint).await?)
    }

    async fn add_record(&self, request: GatewayRequest) -> gateway::Result<Value> {
        let endpoint = self.require_endpoint()?;
        tracing::debug!(endpoint, action = %request.action, "sending write");
        let response = self.post_action(endpoint, &request).await?;
        response.into_result()?.ok_or_else(|| {
            GatewayError::MalformedResponse("success response without data".to_string())
        })
    }
}
