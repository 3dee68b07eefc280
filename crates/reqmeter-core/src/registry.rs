//! Label-keyed series registry.
//!
//! Series are created lazily on first use and never removed. Get-or-create
//! goes through the `DashMap` entry API, so concurrent first users of the same
//! key all receive the same `Arc`. Rendering copies the handles out of the
//! maps first and reads values afterwards; series may be observed at slightly
//! different instants but every line is internally consistent.

use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Result;
use crate::exposition::{self, SeriesValue};
use crate::metric::{Buckets, Counter, Histogram, HistogramSnapshot};
use crate::process;
use crate::series::SeriesKey;

pub struct Registry {
    counters: DashMap<SeriesKey, Arc<Counter>>,
    histograms: DashMap<SeriesKey, Arc<Histogram>>,
    started: Instant,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
            histograms: DashMap::new(),
            started: Instant::now(),
        }
    }

    /// Return the counter for `key`, creating it if this is the first use.
    pub fn get_or_create_counter(&self, key: SeriesKey) -> Arc<Counter> {
        if let Some(c) = self.counters.get(&key) {
            return Arc::clone(c.value());
        }
        match self.counters.entry(key) {
            Entry::Occupied(e) => Arc::clone(e.get()),
            Entry::Vacant(e) => {
                tracing::debug!(series = ?e.key(), "counter series created");
                Arc::clone(e.insert(Arc::new(Counter::new())).value())
            }
        }
    }

    /// Return the histogram for `key`, creating it with `buckets` if this is
    /// the first use. An existing series keeps the buckets it was created with.
    pub fn get_or_create_histogram(&self, key: SeriesKey, buckets: Buckets) -> Arc<Histogram> {
        if let Some(h) = self.histograms.get(&key) {
            return Arc::clone(h.value());
        }
        match self.histograms.entry(key) {
            Entry::Occupied(e) => Arc::clone(e.get()),
            Entry::Vacant(e) => {
                tracing::debug!(series = ?e.key(), "histogram series created");
                Arc::clone(e.insert(Arc::new(Histogram::new(buckets))).value())
            }
        }
    }

    /// Current value of a counter series, if it exists.
    pub fn counter_value(&self, key: &SeriesKey) -> Option<u64> {
        self.counters.get(key).map(|c| c.value().get())
    }

    /// Current snapshot of a histogram series, if it exists.
    pub fn histogram_snapshot(&self, key: &SeriesKey) -> Option<HistogramSnapshot> {
        self.histograms.get(key).map(|h| h.value().snapshot())
    }

    /// Number of live series across all metric kinds.
    pub fn series_count(&self) -> usize {
        self.counters.len() + self.histograms.len()
    }

    /// Copy every series out of the registry, sorted by key.
    pub fn gather(&self) -> Vec<(SeriesKey, SeriesValue)> {
        let counters: Vec<(SeriesKey, Arc<Counter>)> = self
            .counters
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        let histograms: Vec<(SeriesKey, Arc<Histogram>)> = self
            .histograms
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();

        let mut out: Vec<(SeriesKey, SeriesValue)> = counters
            .into_iter()
            .map(|(k, c)| (k, SeriesValue::Counter(c.get())))
            .chain(
                histograms
                    .into_iter()
                    .map(|(k, h)| (k, SeriesValue::Histogram(h.snapshot()))),
            )
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Render the registry as Prometheus text.
    pub fn render(&self, include_process: bool) -> String {
        let mut out = String::new();
        exposition::encode(&self.gather(), &mut out);
        if include_process {
            exposition::encode(&process::collect(self.started), &mut out);
        }
        out
    }

    /// Render into `w`. Only write failures are reported.
    pub fn write_exposition<W: std::io::Write>(
        &self,
        w: &mut W,
        include_process: bool,
    ) -> Result<()> {
        let text = self.render(include_process);
        w.write_all(text.as_bytes())?;
        w.flush()?;
        Ok(())
    }
}
