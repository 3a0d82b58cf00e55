use axum::Json;
use serde_json::{json, Value};

/// GET /healthz - Liveness probe.
#[axum::debug_handler]
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
