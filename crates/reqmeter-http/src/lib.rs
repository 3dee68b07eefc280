//! reqmeter HTTP integration.
//!
//! Wires the request timer and metrics recorder into axum as a middleware
//! layer and serves the registry at `/metrics`. Used by the demo binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod demo;
pub mod instrument;
pub mod ops;
pub mod router;
