//! Config loader (strict parsing).

pub mod schema;

use std::fs;

use reqmeter_core::error::{ReqmeterError, Result};

pub use schema::{MetricsOpts, ReqmeterConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<ReqmeterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ReqmeterError::InvalidConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ReqmeterConfig> {
    let cfg: ReqmeterConfig = serde_yaml::from_str(s)
        .map_err(|e| ReqmeterError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
