//! Health check route.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub webhooks_configured: bool,
    pub storage_configured: bool,
}

/// GET /health -- liveness plus a configuration readout.
///
/// Reports on configuration only. The workflow is never called from
/// here, so probes stay cheap and a slow upstream cannot fail them.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let urls = state.n8n.urls();
    let webhooks_configured =
        !urls.gallery.is_empty() && !urls.upload.is_empty() && !urls.delete.is_empty();
    let storage_configured = !state.store.bucket().is_empty();

    let status = if webhooks_configured && storage_configured {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        webhooks_configured,
        storage_configured,
    })
}

/// ```text
/// GET /health
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
