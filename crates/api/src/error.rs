use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lookbook_core::error::CoreError;
use serde_json::json;

use crate::export::ExportError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds variants for the two
/// upstream dependencies (the n8n workflow and object storage).
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lookbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An n8n webhook call failed (transport or non-2xx response).
    #[error("Webhook error: {0}")]
    Webhook(#[from] lookbook_n8n::N8nError),

    /// An object storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] lookbook_storage::StorageError),

    /// A batch export run failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Upstream errors ---
            AppError::Webhook(err) => classify_webhook_error(err),
            AppError::Export(err) => classify_export_error(err),

            AppError::Storage(err) => {
                tracing::error!(error = %err, "Object storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Object storage operation failed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an n8n webhook failure into an HTTP status, error code, and message.
///
/// A non-2xx upstream response surfaces the upstream body text so operators
/// can see what the workflow said without digging through n8n's own logs;
/// transport failures stay opaque to the client.
fn classify_webhook_error(err: &lookbook_n8n::N8nError) -> (StatusCode, &'static str, String) {
    match err {
        lookbook_n8n::N8nError::Api { status, body } => {
            tracing::error!(
                upstream_status = status,
                upstream_body = %body,
                "n8n webhook rejected the request"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                format!("Workflow responded with status {status}: {body}"),
            )
        }
        lookbook_n8n::N8nError::Request(e) => {
            tracing::error!(error = %e, "n8n webhook request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                "Workflow request failed".to_string(),
            )
        }
    }
}

/// Classify a batch export failure.
///
/// A fetch failure names the item that broke the run; archive assembly
/// failures are internal.
fn classify_export_error(err: &ExportError) -> (StatusCode, &'static str, String) {
    match err {
        ExportError::Fetch { index, url, source } => {
            tracing::error!(index, url = %url, error = %source, "Export item fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                format!("Failed to fetch export item {} ({url})", index + 1),
            )
        }
        ExportError::Zip(e) => {
            tracing::error!(error = %e, "Export archive assembly failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        ExportError::Io(e) => {
            tracing::error!(error = %e, "Export archive assembly failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
