//! Handler for the two-step product deletion flow.
//!
//! The client confirms in its own dialog before calling this endpoint,
//! so by the time a request lands here the deletion is final. The
//! workflow owns the actual file removal; this handler validates the
//! request, forwards it, and maps the workflow's verdict onto HTTP.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use lookbook_core::category::Category;
use lookbook_core::deletion::DeleteCommand;
use lookbook_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::handlers::validate_body;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for DELETE /delete-product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductRequest {
    #[validate(length(min = 1, message = "productId must not be empty"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "productName must not be empty"))]
    pub product_name: String,
    pub category: String,
    /// Workflow-side file ids to remove alongside the product record.
    #[serde(default)]
    pub file_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    pub message: String,
}

/// DELETE /delete-product -- remove a product group via the workflow.
///
/// The workflow reports `success: false` when it cannot find the
/// product, which surfaces here as a 404 so stale gallery entries are
/// distinguishable from transport failures.
pub async fn delete_product(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<DeleteProductRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;

    let category = input
        .category
        .parse::<Category>()
        .map_err(AppError::Core)?;

    let command = DeleteCommand {
        product_id: input.product_id.clone(),
        product_name: input.product_name.clone(),
        category,
        file_ids: input.file_ids.clone(),
    };

    let outcome = state.n8n.delete_product(&command).await?;

    if !outcome.success {
        tracing::warn!(
            product_id = %command.product_id,
            message = ?outcome.message,
            "Workflow declined the deletion"
        );
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: command.product_id,
        }));
    }

    tracing::info!(
        product_id = %command.product_id,
        product_name = %command.product_name,
        category = %command.category,
        deleted = ?outcome.deleted_files,
        user = %user.email,
        "Product deleted"
    );

    let result = DeleteResult {
        success: true,
        message: outcome
            .message
            .unwrap_or_else(|| "Product deleted".to_string()),
    };

    Ok(Json(DataResponse { data: result }))
}
