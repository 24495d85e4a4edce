//! Shared response envelope for API handlers.
//!
//! Successful responses wrap their payload in `{ "data": ... }` so the
//! gallery frontend can distinguish payloads from the `{ "error", "code" }`
//! shape produced by [`crate::error::AppError`]. Handlers return
//! [`DataResponse`] rather than ad-hoc `serde_json::json!` blobs to keep
//! the envelope type-checked.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: listing }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
