//! HTTP surface for the triage engine: a small axum API served on loopback.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
