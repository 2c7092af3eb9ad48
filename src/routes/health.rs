use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "audit-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "llm_provider": state.llm_client.provider_name(),
    }))
}
