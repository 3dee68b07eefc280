//! Post-handler hook: label derivation and registry updates.
//!
//! The recorder never fails. Missing inputs degrade to zero elapsed time or
//! an empty/raw label instead of touching the response.

use std::sync::Arc;
use std::time::Duration;

use reqmeter_core::{Buckets, Registry, SeriesKey};

use super::{labels, names};
use crate::config::MetricsOpts;
use crate::context::RequestContext;

/// Response-side facts about a finished request.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub method: &'a str,
    /// Raw request path.
    pub path: &'a str,
    pub status: u16,
    pub body_len: u64,
}

/// Resolved label values shared by all three series of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpLabels {
    pub service: String,
    pub status: String,
    pub method: String,
    pub path: String,
}

impl HttpLabels {
    pub fn key(&self, name: &str) -> SeriesKey {
        SeriesKey::new(
            name,
            &[
                (labels::SERVICE, self.service.as_str()),
                (labels::STATUS, self.status.as_str()),
                (labels::METHOD, self.method.as_str()),
                (labels::PATH, self.path.as_str()),
            ],
        )
    }
}

/// Status code as a label. With `normalize` only the class is kept.
pub fn status_label(status: u16, normalize: bool) -> String {
    let raw = status.to_string();
    if !normalize {
        return raw;
    }
    match raw.chars().next() {
        Some(class) => format!("{class}xx"),
        None => String::new(),
    }
}

pub struct MetricsRecorder {
    opts: MetricsOpts,
    registry: Arc<Registry>,
}

impl MetricsRecorder {
    pub fn new(opts: MetricsOpts, registry: Arc<Registry>) -> Self {
        Self { opts, registry }
    }

    pub fn opts(&self) -> &MetricsOpts {
        &self.opts
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Labels for a finished request.
    pub fn labels(&self, ctx: &RequestContext, ex: &Exchange<'_>) -> HttpLabels {
        // Route templates keep path parameters out of the label set.
        let path = self
            .opts
            .route_label_source
            .as_deref()
            .and_then(|key| ctx.get_value(key))
            .unwrap_or(ex.path);

        HttpLabels {
            service: self.opts.service_name.clone(),
            status: status_label(ex.status, self.opts.normalize_status),
            method: ex.method.to_string(),
            path: path.to_string(),
        }
    }

    /// Post-handler hook.
    pub fn after(&self, ctx: &RequestContext, ex: &Exchange<'_>) {
        let elapsed = match ctx.start() {
            Some(start) => start.elapsed(),
            None => {
                tracing::warn!(
                    method = ex.method,
                    path = ex.path,
                    "request start missing, recording zero duration"
                );
                Duration::ZERO
            }
        };

        let labels = self.labels(ctx, ex);

        self.registry
            .get_or_create_counter(labels.key(names::REQUESTS_TOTAL))
            .inc();
        self.registry
            .get_or_create_histogram(
                labels.key(names::REQUEST_DURATION_SECONDS),
                Buckets::DURATION_SECONDS,
            )
            .observe_duration(elapsed);
        self.registry
            .get_or_create_histogram(
                labels.key(names::RESPONSE_SIZE_BYTES),
                Buckets::SIZE_BYTES,
            )
            .observe(ex.body_len as f64);
    }
}
