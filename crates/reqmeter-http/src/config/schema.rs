use std::net::SocketAddr;

use serde::Deserialize;
use reqmeter_core::error::{ReqmeterError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReqmeterConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsOpts,
}

impl Default for ReqmeterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsOpts::default(),
        }
    }
}

impl ReqmeterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ReqmeterError::UnsupportedVersion(self.version));
        }
        self.server.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            ReqmeterError::InvalidConfig(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| ReqmeterError::InvalidConfig(format!("server.listen: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:6090".into()
}

/// Recording and exposition options.
///
/// Every field is defaulted on its own: a file that sets only
/// `service_name` still gets status normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsOpts {
    /// Collapse status codes to their class (`404` -> `4xx`).
    #[serde(default = "default_true")]
    pub normalize_status: bool,

    /// Append process metrics to the exposition.
    #[serde(default)]
    pub expose_runtime_metrics: bool,

    /// Context key holding the matched route template. When set and present
    /// for a request, it replaces the raw path as the `path` label.
    #[serde(default)]
    pub route_label_source: Option<String>,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for MetricsOpts {
    fn default() -> Self {
        Self {
            normalize_status: true,
            expose_runtime_metrics: false,
            route_label_source: None,
            service_name: default_service_name(),
        }
    }
}

impl MetricsOpts {
    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(ReqmeterError::InvalidConfig(
                "metrics.service_name must not be empty".into(),
            ));
        }
        if matches!(self.route_label_source.as_deref(), Some(k) if k.is_empty()) {
            return Err(ReqmeterError::InvalidConfig(
                "metrics.route_label_source must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}
fn default_service_name() -> String {
    "default".into()
}
