//! HTTP client for the n8n webhook endpoints.
//!
//! Wraps the gallery, upload, and delete webhooks using [`reqwest`].

use lookbook_core::deletion::DeleteCommand;

use crate::types::{DeleteOutcome, GalleryFeed, UploadFile, WebhookUrls};

/// Errors from the n8n webhook layer.
#[derive(Debug, thiserror::Error)]
pub enum N8nError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The webhook returned a non-2xx status code.
    #[error("n8n webhook error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the configured n8n instance.
pub struct N8nClient {
    client: reqwest::Client,
    urls: WebhookUrls,
}

impl N8nClient {
    /// Create a client with its own connection pool.
    pub fn new(urls: WebhookUrls) -> Self {
        Self {
            client: reqwest::Client::new(),
            urls,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across the app).
    pub fn with_client(client: reqwest::Client, urls: WebhookUrls) -> Self {
        Self { client, urls }
    }

    /// The configured webhook endpoints.
    pub fn urls(&self) -> &WebhookUrls {
        &self.urls
    }

    /// Fetch the gallery feed.
    ///
    /// Sends a `GET` to the gallery webhook and returns the raw group
    /// list for normalization.
    pub async fn fetch_gallery(&self) -> Result<GalleryFeed, N8nError> {
        tracing::debug!(url = %self.urls.gallery, "Fetching gallery feed");
        let response = self.client.get(&self.urls.gallery).send().await?;
        Self::parse_response(response).await
    }

    /// Delete a product and all of its hosted files.
    ///
    /// Posts the command with a millisecond timestamp, which the
    /// workflow records with the deletion. A 2xx response whose
    /// `success` is `false` means the workflow could not find the
    /// product; that is returned as a normal [`DeleteOutcome`] for the
    /// caller to map.
    pub async fn delete_product(&self, command: &DeleteCommand) -> Result<DeleteOutcome, N8nError> {
        tracing::debug!(
            product_id = %command.product_id,
            files = command.file_ids.len(),
            "Dispatching product deletion"
        );

        let body = serde_json::json!({
            "productId": command.product_id,
            "productName": command.product_name,
            "category": command.category,
            "fileIds": command.file_ids,
            "timestamp": chrono::Utc::now().timestamp_millis(),
        });

        let response = self
            .client
            .post(&self.urls.delete)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Forward an upload to the processing workflow.
    ///
    /// Rebuilds the multipart form the workflow expects: the category,
    /// optional client timestamp, optional side (`front`/`back` for
    /// new-system uploads), and the image files under their original
    /// field names. Returns the workflow's JSON response as-is; its
    /// shape varies between workflow versions.
    pub async fn forward_upload(
        &self,
        category: &str,
        timestamp: Option<&str>,
        side: Option<&str>,
        files: Vec<UploadFile>,
    ) -> Result<serde_json::Value, N8nError> {
        tracing::debug!(category, files = files.len(), "Forwarding upload to workflow");

        let mut form = reqwest::multipart::Form::new().text("category", category.to_string());
        if let Some(ts) = timestamp {
            form = form.text("timestamp", ts.to_string());
        }
        if let Some(side) = side {
            form = form.text("side", side.to_string());
        }
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(file.field_name, part);
        }

        let response = self
            .client
            .post(&self.urls.upload)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`N8nError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, N8nError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(N8nError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, N8nError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
