//! Liveness probe.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/health - Static ok indicator plus the configured allow-list.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "allowed_origins": state.config.allowed_origins,
    }))
}
