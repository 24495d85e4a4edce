//! Gallery routes: listing, export, and download planning.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// ```text
/// GET  /                     list groups (filters: category, date, search)
/// POST /export               build a zip of one group's assets
/// GET  /{id}/download-plan   preview the per-asset download order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery))
        .route("/export", post(gallery::export_group))
        .route("/{id}/download-plan", get(gallery::download_plan))
}
