//! Object store wrapper around the AWS S3 SDK.

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to store object '{key}': {message}")]
    Put { key: String, message: String },

    #[error("failed to delete object '{key}': {message}")]
    Delete { key: String, message: String },
}

/// Connection settings for the object store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, ...).
    /// When set, path-style addressing is used.
    pub endpoint: Option<String>,
    /// Base URL for public object links. Falls back to the endpoint
    /// (path-style) or the standard AWS virtual-hosted URL.
    pub public_base_url: Option<String>,
    /// Static credentials; when `None` the SDK's default provider chain
    /// applies (env vars, profiles, instance metadata).
    pub credentials: Option<(String, String)>,
}

/// Client for the originals bucket.
#[derive(Clone)]
pub struct ObjectStore {
    client: aws_sdk_s3::Client,
    config: StorageConfig,
}

impl ObjectStore {
    /// Build a store from configuration. Constructing the SDK client
    /// performs no network I/O.
    pub async fn from_config(config: StorageConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let Some((access_key, secret_key)) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "lookbook-config",
            ));
        }

        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if config.endpoint.is_some() {
            // S3-compatible providers generally do not support
            // virtual-hosted bucket addressing.
            builder = builder.force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            config,
        }
    }

    /// The configured bucket name.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Build the object key for an uploaded original:
    /// `{category}/{timestamp}/{uuid}-{filename}`.
    ///
    /// The UUIDv7 prefix keeps keys unique and roughly time-ordered
    /// even when two uploads share a filename.
    pub fn object_key(category: &str, timestamp: &str, file_name: &str) -> String {
        format!("{category}/{timestamp}/{}-{file_name}", uuid::Uuid::now_v7())
    }

    /// Store an object and return nothing; the caller already knows the
    /// key it asked for.
    pub async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Put {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(key, bucket = %self.config.bucket, "Stored original");
        Ok(())
    }

    /// Delete an object. Missing keys are treated as success by S3.
    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(key, bucket = %self.config.bucket, "Deleted original");
        Ok(())
    }

    /// Public URL for a stored object.
    pub fn public_url(&self, key: &str) -> String {
        if let Some(base) = &self.config.public_base_url {
            format!("{}/{key}", base.trim_end_matches('/'))
        } else if let Some(endpoint) = &self.config.endpoint {
            format!(
                "{}/{}/{key}",
                endpoint.trim_end_matches('/'),
                self.config.bucket
            )
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{key}",
                self.config.bucket, self.config.region
            )
        }
    }
}
