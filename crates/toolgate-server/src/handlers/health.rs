use axum::{extract::State, Json};
use serde_json::Value;

use crate::app_state::AppState;

/// Liveness probe; reports the server identity and how many tools it serves.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "name": state.config.server_name,
        "tools": state.dispatcher.registry().len(),
    }))
}
