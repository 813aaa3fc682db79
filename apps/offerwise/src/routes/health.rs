use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::SessionBackend;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let session_backend = match state.config.session_backend {
        SessionBackend::Memory => "memory",
        SessionBackend::Redis => "redis",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "offerwise",
        "session_backend": session_backend,
        "band_pairs": state.bands.len()
    }))
}
