//! Upload route.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Phone photos routinely exceed axum's 2 MB default body cap.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// ```text
/// POST /   multipart photo upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
