//! HTTP service for the lookbook backend.
//!
//! Thin axum layer over the domain crates: normalized gallery reads
//! with filtering, multipart photo uploads with persisted originals,
//! workflow-backed deletion, and sequential zip export.

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
