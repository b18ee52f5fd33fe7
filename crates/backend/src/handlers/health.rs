use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
