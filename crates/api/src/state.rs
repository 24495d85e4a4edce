use std::sync::Arc;

use lookbook_n8n::N8nClient;
use lookbook_storage::ObjectStore;

use crate::auth::allowlist::AllowList;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (timeouts, session secret, export pacing).
    pub config: Arc<ServerConfig>,
    /// Client for the three n8n webhooks (gallery feed, upload, delete).
    pub n8n: Arc<N8nClient>,
    /// Object store holding uploaded originals.
    pub store: Arc<ObjectStore>,
    /// Addresses permitted to sign in.
    pub allow_list: Arc<AllowList>,
    /// Shared HTTP client for asset fetches during batch export.
    pub http: reqwest::Client,
}
