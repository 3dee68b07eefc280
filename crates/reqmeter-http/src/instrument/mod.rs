//! Request instrumentation.
//!
//! - `timer`: pre-handler hook, stamps the request start
//! - `recorder`: post-handler hook, derives labels and updates the registry
//! - `layer`: axum middleware wiring both hooks around every route

pub mod layer;
pub mod recorder;
pub mod timer;

pub use layer::track_requests;
pub use recorder::{status_label, Exchange, HttpLabels, MetricsRecorder};
pub use timer::RequestTimer;

/// Metric names.
pub mod names {
    pub const REQUESTS_TOTAL: &str = "requests_total";
    pub const REQUEST_DURATION_SECONDS: &str = "request_duration_seconds";
    pub const RESPONSE_SIZE_BYTES: &str = "response_size_bytes";
}

/// Label keys, in exposition order.
pub mod labels {
    pub const SERVICE: &str = "service";
    pub const STATUS: &str = "status";
    pub const METHOD: &str = "method";
    pub const PATH: &str = "path";
}
