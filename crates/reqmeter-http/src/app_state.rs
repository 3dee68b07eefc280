//! Shared application state.
//!
//! Owns the registry for the life of the server and hands the same instance to
//! the recorder (writes) and the exposition handler (reads).

use std::sync::Arc;

use reqmeter_core::Registry;

use crate::config::{MetricsOpts, ReqmeterConfig};
use crate::instrument::MetricsRecorder;

#[derive(Clone)]
pub struct AppState {
    recorder: Arc<MetricsRecorder>,
}

impl AppState {
    /// Build state with a fresh registry.
    pub fn new(cfg: ReqmeterConfig) -> Self {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Build state around an existing registry.
    pub fn with_registry(cfg: ReqmeterConfig, registry: Arc<Registry>) -> Self {
        Self {
            recorder: Arc::new(MetricsRecorder::new(cfg.metrics, registry)),
        }
    }

    pub fn opts(&self) -> &MetricsOpts {
        self.recorder.opts()
    }

    pub fn recorder(&self) -> Arc<MetricsRecorder> {
        Arc::clone(&self.recorder)
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(self.recorder.registry())
    }
}
