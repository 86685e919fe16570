use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service identity plus which external collaborators are live.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "persona-api",
        "version": env!("CARGO_PKG_VERSION"),
        "gemini_configured": state.llm.is_some(),
        "firestore_configured": state.store.is_configured(),
        "fund_data_available": state.funds.is_available(),
    }))
}
