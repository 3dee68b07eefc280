//! reqmeter core: series registry, metric value types, and Prometheus text
//! exposition.
//!
//! This crate carries no HTTP or runtime dependencies. The http crate drives
//! it from request hooks; anything else that can produce label sets can too.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied outside tests. Recording
//! never fails; only writing the exposition can surface an error.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod exposition;
pub mod metric;
pub mod process;
pub mod registry;
pub mod series;

/// Shared result type.
pub use error::{ErrorCode, ReqmeterError, Result};
pub use exposition::CONTENT_TYPE;
pub use metric::{Buckets, Counter, Histogram, HistogramSnapshot};
pub use registry::Registry;
pub use series::SeriesKey;
