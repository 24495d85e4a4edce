use std::time::Duration;

use lookbook_n8n::WebhookUrls;
use lookbook_storage::StorageConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Fields with defaults are suitable for local development; the webhook
/// URLs, the bucket, and the session secret have no safe default and
/// must be provided. Missing required values abort startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    /// Reserved for draining long-running export requests.
    #[allow(dead_code)]
    pub shutdown_timeout_secs: u64,
    /// Session token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// The three n8n webhook endpoints.
    pub webhooks: WebhookUrls,
    /// Object storage holding uploaded originals.
    pub storage: StorageConfig,
    /// Batch export pacing.
    pub export: ExportConfig,
}

/// Settings for the sequential batch export engine.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Pause between consecutive item fetches (default: 500 ms).
    pub item_delay: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                    |
    /// |------------------------|----------|----------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`                  |
    /// | `PORT`                 | no       | `3000`                     |
    /// | `CORS_ORIGINS`         | no       | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| no       | `30`                       |
    /// | `N8N_GALLERY_URL`      | **yes**  | --                         |
    /// | `N8N_UPLOAD_URL`       | **yes**  | --                         |
    /// | `N8N_DELETE_URL`       | **yes**  | --                         |
    /// | `EXPORT_ITEM_DELAY_MS` | no       | `500`                      |
    ///
    /// Session and storage settings are loaded by [`JwtConfig::from_env`]
    /// and [`storage_from_env`].
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a value fails to parse.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let webhooks = WebhookUrls {
            gallery: std::env::var("N8N_GALLERY_URL").expect("N8N_GALLERY_URL must be set"),
            upload: std::env::var("N8N_UPLOAD_URL").expect("N8N_UPLOAD_URL must be set"),
            delete: std::env::var("N8N_DELETE_URL").expect("N8N_DELETE_URL must be set"),
        };

        let item_delay_ms: u64 = std::env::var("EXPORT_ITEM_DELAY_MS")
            .unwrap_or_else(|_| "500".into())
            .parse()
            .expect("EXPORT_ITEM_DELAY_MS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            webhooks,
            storage: storage_from_env(),
            export: ExportConfig {
                item_delay: Duration::from_millis(item_delay_ms),
            },
        }
    }
}

/// Load object storage settings from environment variables.
///
/// | Env Var                | Required | Default       |
/// |------------------------|----------|---------------|
/// | `S3_BUCKET`            | **yes**  | --            |
/// | `S3_REGION`            | no       | `us-east-1`   |
/// | `S3_ENDPOINT`          | no       | --            |
/// | `S3_PUBLIC_BASE_URL`   | no       | --            |
/// | `S3_ACCESS_KEY_ID`     | no       | --            |
/// | `S3_SECRET_ACCESS_KEY` | no       | --            |
///
/// When the key pair is absent the SDK's default provider chain applies
/// (env vars, profiles, instance metadata). Setting only one half of
/// the pair aborts startup.
pub fn storage_from_env() -> StorageConfig {
    let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set");
    let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into());
    let endpoint = std::env::var("S3_ENDPOINT").ok();
    let public_base_url = std::env::var("S3_PUBLIC_BASE_URL").ok();

    let credentials = match (
        std::env::var("S3_ACCESS_KEY_ID").ok(),
        std::env::var("S3_SECRET_ACCESS_KEY").ok(),
    ) {
        (Some(access_key), Some(secret_key)) => Some((access_key, secret_key)),
        (None, None) => None,
        _ => panic!("S3_ACCESS_KEY_ID and S3_SECRET_ACCESS_KEY must be set together"),
    };

    StorageConfig {
        bucket,
        region,
        endpoint,
        public_base_url,
        credentials,
    }
}
