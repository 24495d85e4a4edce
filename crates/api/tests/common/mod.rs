//! Shared helpers for API integration tests.
//!
//! Webhook and storage endpoints point at an unroutable local port so
//! upstream calls fail fast instead of hanging a test.

// Each test binary compiles its own copy of this module and uses a
// subset of the helpers.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use lookbook_api::auth::allowlist::AllowList;
use lookbook_api::auth::jwt::{issue_session_token, JwtConfig};
use lookbook_api::config::{ExportConfig, ServerConfig};
use lookbook_api::routes;
use lookbook_api::state::AppState;
use lookbook_n8n::{N8nClient, WebhookUrls};
use lookbook_storage::{ObjectStore, StorageConfig};

/// Secret used for minting and validating test session tokens.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// The one email address on the test allow list.
pub const ALLOWED_EMAIL: &str = "studio@example.com";

/// Webhook URLs pointed at a local port nothing listens on.
pub fn test_webhooks() -> WebhookUrls {
    WebhookUrls {
        gallery: "http://127.0.0.1:9/webhook/gallery".to_string(),
        upload: "http://127.0.0.1:9/webhook/upload".to_string(),
        delete: "http://127.0.0.1:9/webhook/delete".to_string(),
    }
}

/// Storage config with static credentials and a local endpoint so the
/// client builds without consulting the ambient AWS credential chain.
pub fn test_storage() -> StorageConfig {
    StorageConfig {
        bucket: "test-originals".to_string(),
        region: "us-east-1".to_string(),
        endpoint: Some("http://127.0.0.1:9".to_string()),
        public_base_url: None,
        credentials: Some(("test-key".to_string(), "test-secret".to_string())),
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The export delay is zero so sequential-download tests do not sleep.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            session_expiry_mins: 60,
        },
        webhooks: test_webhooks(),
        storage: test_storage(),
        export: ExportConfig {
            item_delay: Duration::ZERO,
        },
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// compression, panic recovery) that production uses.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let n8n = N8nClient::new(config.webhooks.clone());
    let store = ObjectStore::from_config(config.storage.clone()).await;
    let allow_list = AllowList::from_entries([ALLOWED_EMAIL]);

    let state = AppState {
        n8n: Arc::new(n8n),
        store: Arc::new(store),
        allow_list: Arc::new(allow_list),
        http: reqwest::Client::new(),
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint a session token for the allow-listed test user.
pub fn auth_token() -> String {
    let config = test_config();
    issue_session_token(ALLOWED_EMAIL, &config.jwt).expect("minting a test token should succeed")
}

/// Issue a GET request with no Authorization header.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a GET request as the allow-listed test user.
pub async fn get_authed(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", auth_token()))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a JSON request as the allow-listed test user.
pub async fn send_json_authed(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", auth_token()))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
