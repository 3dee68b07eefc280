//! Per-request state shared between the pre- and post-handler hooks.
//!
//! One `RequestContext` is created per request by the instrumentation layer
//! and dropped once the recorder has run.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Context key under which the layer stores axum's matched route template.
pub const MATCHED_ROUTE_KEY: &str = "matched_route";

/// Wall-clock start of a request.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(Instant);

impl RequestStart {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

#[derive(Debug, Default)]
pub struct RequestContext {
    start: Option<RequestStart>,
    values: HashMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, start: RequestStart) {
        self.start = Some(start);
    }

    pub fn start(&self) -> Option<RequestStart> {
        self.start
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Values a handler attaches to its response to be copied into the request
/// context before the recorder runs (e.g. a custom route label).
#[derive(Debug, Clone, Default)]
pub struct ContextValues(pub Vec<(String, String)>);

impl ContextValues {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }
}
