//! S3-compatible object storage for original photos.
//!
//! Uploaded originals are persisted here before being forwarded to the
//! processing workflow, so the source material survives even when the
//! workflow mangles a job. Works against AWS S3 or any S3-compatible
//! provider via a custom endpoint with path-style addressing.

pub mod store;

pub use store::{ObjectStore, StorageConfig, StorageError};
