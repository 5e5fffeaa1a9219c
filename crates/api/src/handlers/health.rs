//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Returns 200 with a static body; used by deploy tooling and tests.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
