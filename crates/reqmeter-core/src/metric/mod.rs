//! Series value types.
//!
//! Counters are a single atomic. Histograms take a short per-series lock so
//! that count, sum and buckets always move together.

pub mod counter;
pub mod histogram;

pub use counter::Counter;
pub use histogram::{Buckets, Histogram, HistogramSnapshot};
