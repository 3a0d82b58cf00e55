use async_trait::async_trait;
use serde_json::Value;

use super::{GatewayRequest, Result, Snapshot};

/// Request/response access to the remote record stores.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetches both collections.
    async fn fetch_all(&self) -> Result<Snapshot>;

    /// Sends a write request and returns the stored record.
    ///
    /// For add actions the gateway assigns the identifier.
    async fn add_record(&self, request: GatewayRequest) -> Result<Value>;
}
