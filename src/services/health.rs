// Liveness probe
//
// Numan Thabit 2025 Nov

use axum::response::Json;
use serde_json::{json, Value};

/// Always `{"status": "ok"}` while the process is serving.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
