//! Session authentication: JWT validation and the sign-in allow-list.

pub mod allowlist;
pub mod jwt;
