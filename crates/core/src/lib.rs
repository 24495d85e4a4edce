//! Domain logic for the Lookbook product-photo gallery.
//!
//! Provides the normalization layer that reconciles the two upstream
//! payload schemas into one browsable model, gallery filtering and
//! statistics, the comparison-viewer and deletion state machines,
//! batch-download planning, and shared formatting helpers.
//!
//! This crate is pure: no I/O, no HTTP, no clocks. Anything
//! time-dependent takes `now` as a parameter so callers (and tests)
//! control it.

pub mod category;
pub mod deletion;
pub mod error;
pub mod filter;
pub mod format;
pub mod group;
pub mod normalize;
pub mod plan;
pub mod viewer;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
