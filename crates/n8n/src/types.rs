//! Wire types for the n8n webhook endpoints.

use serde::Deserialize;

/// The three webhook endpoints the client talks to.
#[derive(Debug, Clone)]
pub struct WebhookUrls {
    /// GET: returns the gallery feed.
    pub gallery: String,
    /// POST multipart: receives uploaded photos for processing.
    pub upload: String,
    /// POST: deletes a product and its hosted files.
    pub delete: String,
}

/// The gallery webhook payload.
///
/// Groups are kept as raw JSON here: schema discrimination and error
/// handling belong to the normalizer, which tolerates malformed entries
/// per group instead of failing the whole feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFeed {
    #[serde(default)]
    pub image_groups: Vec<serde_json::Value>,
    /// Upstream also sends precomputed stats; they are ignored because
    /// stats are recomputed over the filtered listing.
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
}

/// The delete webhook response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_files: Option<Vec<String>>,
}

/// One file forwarded to the upload webhook.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Multipart field name (`image_0`, `image_1`, ...).
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
