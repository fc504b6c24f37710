//! Root health endpoint.

use axum::Json;

/// GET / - service liveness message.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Anagrafe API is running" }))
}
