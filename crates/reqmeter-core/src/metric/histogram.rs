use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Fixed upper bounds for a histogram, ascending. `+Inf` is implicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buckets(&'static [f64]);

impl Buckets {
    /// Request latency in seconds.
    pub const DURATION_SECONDS: Buckets = Buckets(&[
        0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ]);

    /// Payload size in bytes, powers of 4 from 64 B to 16 MiB.
    pub const SIZE_BYTES: Buckets = Buckets(&[
        64.0,
        256.0,
        1_024.0,
        4_096.0,
        16_384.0,
        65_536.0,
        262_144.0,
        1_048_576.0,
        4_194_304.0,
        16_777_216.0,
    ]);

    pub fn bounds(&self) -> &'static [f64] {
        self.0
    }
}

#[derive(Debug)]
struct State {
    // per-bucket (non-cumulative) hits; index == bounds.len() is the +Inf overflow
    hits: Vec<u64>,
    count: u64,
    sum: f64,
}

/// Point-in-time copy of a histogram, buckets already cumulative.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper_bound, cumulative_count)` for every finite bound.
    pub buckets: Vec<(f64, u64)>,
    pub count: u64,
    pub sum: f64,
}

#[derive(Debug)]
pub struct Histogram {
    buckets: Buckets,
    state: Mutex<State>,
}

impl Histogram {
    pub fn new(buckets: Buckets) -> Self {
        Self {
            buckets,
            state: Mutex::new(State {
                hits: vec![0; buckets.bounds().len() + 1],
                count: 0,
                sum: 0.0,
            }),
        }
    }

    pub fn buckets(&self) -> Buckets {
        self.buckets
    }

    /// Record one observation. NaN is ignored.
    pub fn observe(&self, v: f64) {
        if v.is_nan() {
            return;
        }
        let bounds = self.buckets.bounds();
        let idx = bounds.partition_point(|&b| b < v);

        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        st.hits[idx] += 1;
        st.count += 1;
        st.sum += v;
    }

    /// Record a duration in seconds.
    pub fn observe_duration(&self, d: Duration) {
        self.observe(d.as_secs_f64());
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut acc = 0u64;
        let buckets = self
            .buckets
            .bounds()
            .iter()
            .zip(st.hits.iter())
            .map(|(&le, &hits)| {
                acc += hits;
                (le, acc)
            })
            .collect();

        HistogramSnapshot {
            buckets,
            count: st.count,
            sum: st.sum,
        }
    }
}
