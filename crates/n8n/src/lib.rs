//! Typed client for the n8n automation webhooks.
//!
//! The processing pipeline lives in n8n; this crate wraps its three
//! webhook endpoints (gallery feed, upload intake, product deletion)
//! with typed requests and errors. Calls are single-shot by design:
//! there is no retry layer, callers surface upstream failures directly.

pub mod client;
pub mod types;

pub use client::{N8nClient, N8nError};
pub use types::{DeleteOutcome, GalleryFeed, UploadFile, WebhookUrls};
