//! Top-level facade crate for reqmeter.
//!
//! Re-exports the core registry and the HTTP instrumentation so users can
//! depend on a single crate.

pub mod core {
    pub use reqmeter_core::*;
}

pub mod http {
    pub use reqmeter_http::*;
}
