//! Prometheus text exposition (format version 0.0.4).
//!
//! Input must already be sorted by series key; a `# TYPE` line is written each
//! time the metric name changes.

use std::fmt::Write;

use crate::metric::HistogramSnapshot;
use crate::series::{Label, SeriesKey};

/// Content type served alongside the rendered text.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Value captured for one series at render time.
#[derive(Debug, Clone)]
pub enum SeriesValue {
    Counter(u64),
    /// Monotonic total that is not a whole number (e.g. CPU seconds).
    FloatCounter(f64),
    Gauge(f64),
    Histogram(HistogramSnapshot),
}

impl SeriesValue {
    fn type_name(&self) -> &'static str {
        match self {
            SeriesValue::Counter(_) | SeriesValue::FloatCounter(_) => "counter",
            SeriesValue::Gauge(_) => "gauge",
            SeriesValue::Histogram(_) => "histogram",
        }
    }
}

/// Escape a label value (`\`, `"`, newline).
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Format a sample value the way Prometheus parsers expect.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v}")
    }
}

fn label_body(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn braced(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("{{{body}}}")
    }
}

/// Render sorted series into `out`.
pub fn encode(series: &[(SeriesKey, SeriesValue)], out: &mut String) {
    let mut last_family: Option<&str> = None;

    for (key, value) in series {
        let name = key.name();
        if last_family != Some(name) {
            let _ = writeln!(out, "# TYPE {} {}", name, value.type_name());
            last_family = Some(name);
        }

        let body = label_body(key.labels());
        match value {
            SeriesValue::Counter(v) => {
                let _ = writeln!(out, "{}{} {}", name, braced(&body), v);
            }
            SeriesValue::FloatCounter(v) | SeriesValue::Gauge(v) => {
                let _ = writeln!(out, "{}{} {}", name, braced(&body), format_value(*v));
            }
            SeriesValue::Histogram(snap) => encode_histogram(name, &body, snap, out),
        }
    }
}

fn encode_histogram(name: &str, body: &str, snap: &HistogramSnapshot, out: &mut String) {
    let prefix = if body.is_empty() { String::new() } else { format!("{body},") };

    for (le, count) in &snap.buckets {
        let _ = writeln!(
            out,
            "{}_bucket{{{}le=\"{}\"}} {}",
            name,
            prefix,
            format_value(*le),
            count
        );
    }
    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, snap.count);
    let _ = writeln!(out, "{}_sum{} {}", name, braced(body), format_value(snap.sum));
    let _ = writeln!(out, "{}_count{} {}", name, braced(body), snap.count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_label_values() {
        assert_eq!(escape_label(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_label("x\ny"), "x\\ny");
    }

    #[test]
    fn formats_values() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(0.005), "0.005");
        assert_eq!(format_value(16_777_216.0), "16777216");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
    }

    #[test]
    fn type_line_written_once_per_family() {
        let series = vec![
            (SeriesKey::new("hits_total", &[("k", "a")]), SeriesValue::Counter(1)),
            (SeriesKey::new("hits_total", &[("k", "b")]), SeriesValue::Counter(2)),
        ];
        let mut out = String::new();
        encode(&series, &mut out);
        assert_eq!(
            out,
            "# TYPE hits_total counter\nhits_total{k=\"a\"} 1\nhits_total{k=\"b\"} 2\n"
        );
    }

    #[test]
    fn unlabelled_series_have_no_braces() {
        let series = vec![(SeriesKey::new("up", &[]), SeriesValue::Gauge(1.0))];
        let mut out = String::new();
        encode(&series, &mut out);
        assert_eq!(out, "# TYPE up gauge\nup 1\n");
    }

    #[test]
    fn float_counter_renders_as_counter() {
        let series = vec![(
            SeriesKey::new("process_cpu_seconds_total", &[]),
            SeriesValue::FloatCounter(1.25),
        )];
        let mut out = String::new();
        encode(&series, &mut out);
        assert_eq!(
            out,
            "# TYPE process_cpu_seconds_total counter\nprocess_cpu_seconds_total 1.25\n"
        );
    }

    #[test]
    fn histogram_expands_to_bucket_sum_count() {
        let snap = HistogramSnapshot {
            buckets: vec![(0.5, 1), (1.0, 2)],
            count: 3,
            sum: 4.25,
        };
        let series = vec![(
            SeriesKey::new("lat", &[("p", "/")]),
            SeriesValue::Histogram(snap),
        )];
        let mut out = String::new();
        encode(&series, &mut out);
        assert_eq!(
            out,
            "# TYPE lat histogram\n\
             lat_bucket{p=\"/\",le=\"0.5\"} 1\n\
             lat_bucket{p=\"/\",le=\"1\"} 2\n\
             lat_bucket{p=\"/\",le=\"+Inf\"} 3\n\
             lat_sum{p=\"/\"} 4.25\n\
             lat_count{p=\"/\"} 3\n"
        );
    }
}
