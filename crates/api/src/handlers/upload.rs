//! Handler for the multipart photo upload endpoint.
//!
//! Originals are persisted to object storage before the payload is
//! forwarded to the processing workflow, so the source photos survive
//! even when the workflow mangles a job.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use image::ImageFormat;
use serde::Serialize;
use serde_json::Value;

use lookbook_core::category::Category;
use lookbook_core::error::CoreError;
use lookbook_n8n::UploadFile;
use lookbook_storage::ObjectStore;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    /// Echoed from the workflow when it returns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Object keys of the persisted originals.
    pub stored_keys: Vec<String>,
}

/// POST /upload -- accept product photos and forward them for processing.
///
/// Multipart fields:
/// - `category` (required): `clothes` / `caps` / `shoes`
/// - `timestamp` (optional): client-supplied upload instant in ms
/// - `side` (optional): `front` / `back` for new-system uploads
/// - `image_*` (one or more): the photo files
pub async fn upload(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut category: Option<Category> = None;
    let mut timestamp: Option<String> = None;
    let mut side: Option<String> = None;
    let mut files: Vec<UploadFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "category" => {
                let raw = read_text(field, "category").await?;
                category = Some(raw.parse::<Category>().map_err(AppError::Core)?);
            }
            "timestamp" => {
                timestamp = Some(read_text(field, "timestamp").await?);
            }
            "side" => {
                let raw = read_text(field, "side").await?;
                if raw != "front" && raw != "back" {
                    return Err(AppError::Core(CoreError::Validation(format!(
                        "side must be 'front' or 'back', got '{raw}'"
                    ))));
                }
                side = Some(raw);
            }
            n if n.starts_with("image") => {
                let file_name = field.file_name().unwrap_or("upload.jpg").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read '{name}': {e}")))?
                    .to_vec();

                ensure_supported_image(&name, &bytes)?;

                files.push(UploadFile {
                    field_name: name,
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let category = category.ok_or_else(|| {
        AppError::Core(CoreError::Validation("category is required".to_string()))
    })?;
    if files.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "at least one image file is required".to_string(),
        )));
    }
    let timestamp =
        timestamp.unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

    // Persist originals first. Keys are computed up front so the
    // response can report them even though puts run concurrently.
    let keys: Vec<String> = files
        .iter()
        .map(|f| ObjectStore::object_key(category.as_str(), &timestamp, &f.file_name))
        .collect();

    let puts = files.iter().zip(&keys).map(|(file, key)| {
        state
            .store
            .put_object(key, file.bytes.clone(), &file.content_type)
    });
    futures::future::try_join_all(puts).await?;

    tracing::info!(
        category = %category,
        count = files.len(),
        user = %user.email,
        "Stored original photos"
    );

    let outcome = state
        .n8n
        .forward_upload(category.as_str(), Some(&timestamp), side.as_deref(), files)
        .await?;

    let result = UploadResult {
        success: true,
        message: field_str(&outcome, "message")
            .unwrap_or_else(|| "Upload forwarded for processing".to_string()),
        image_url: field_str(&outcome, "imageUrl"),
        file_name: field_str(&outcome, "fileName"),
        stored_keys: keys,
    };

    Ok(Json(DataResponse { data: result }))
}

/// Read a text field, mapping read failures to a field-level 400.
async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read '{name}': {e}")))
}

/// Reject payloads that are not actually images.
///
/// Sniffs the file header rather than trusting the client-supplied
/// content type; only the formats the workflow can process are allowed.
fn ensure_supported_image(field: &str, bytes: &[u8]) -> AppResult<()> {
    let supported = image::guess_format(bytes)
        .map(|f| matches!(f, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP))
        .unwrap_or(false);

    if !supported {
        return Err(AppError::Core(CoreError::Validation(format!(
            "field '{field}' is not a supported image (png, jpeg, webp)"
        ))));
    }
    Ok(())
}

/// Extract an optional string field from the workflow's JSON reply.
fn field_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}
