//! Shared error type across reqmeter crates.

use thiserror::Error;

/// Stable error codes surfaced to operators and scrape callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration failed to parse or validate.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Exposition could not be written.
    RenderFailed,
}

impl ErrorCode {
    /// String representation used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::RenderFailed => "RENDER_FAILED",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqmeterError>;

/// Unified error type used by core and http crates.
#[derive(Debug, Error)]
pub enum ReqmeterError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),
}

impl ReqmeterError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReqmeterError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            ReqmeterError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            ReqmeterError::Render(_) => ErrorCode::RenderFailed,
        }
    }
}
