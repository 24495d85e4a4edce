//! Product lifecycle routes.

use axum::routing::delete;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// DELETE /delete-product   remove a group via the workflow
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/delete-product", delete(products::delete_product))
}
