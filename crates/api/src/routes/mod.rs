//! HTTP route definitions.
//!
//! Each submodule owns one resource and exposes a `router()` that the
//! top-level assembly nests or merges under `/api/v1`.

pub mod gallery;
pub mod health;
pub mod products;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// All routes under `/api/v1`.
///
/// ```text
/// GET    /gallery                      list product groups
/// POST   /gallery/export               zip one group's assets
/// GET    /gallery/{id}/download-plan   per-asset download order
/// POST   /upload                       multipart photo upload
/// DELETE /delete-product               remove a group
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/gallery", gallery::router())
        .nest("/upload", upload::router())
        .merge(products::router())
}
