//! Structured series identity.
//!
//! A series is a metric name plus a label set. Identity (equality, hashing,
//! ordering) is computed over the labels sorted by name, so `{a, b}` and
//! `{b, a}` address the same series. Rendering keeps the order the labels were
//! declared in by whoever created the series first.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A single `name="value"` pair.
pub type Label = (String, String);

#[derive(Debug, Clone)]
pub struct SeriesKey {
    name: String,
    labels: Vec<Label>,
    sorted: Vec<Label>,
}

impl SeriesKey {
    /// Build a key. Repeated label names keep their first value.
    pub fn new(name: impl Into<String>, labels: &[(&str, &str)]) -> Self {
        let mut declared: Vec<Label> = Vec::with_capacity(labels.len());
        for (k, v) in labels {
            if declared.iter().any(|(seen, _)| seen == k) {
                continue;
            }
            declared.push((k.to_string(), v.to_string()));
        }
        let mut sorted = declared.clone();
        sorted.sort();

        Self {
            name: name.into(),
            labels: declared,
            sorted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl PartialEq for SeriesKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sorted == other.sorted
    }
}

impl Eq for SeriesKey {}

impl Hash for SeriesKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sorted.hash(state);
    }
}

impl PartialOrd for SeriesKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SeriesKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.sorted.cmp(&other.sorted))
    }
}
