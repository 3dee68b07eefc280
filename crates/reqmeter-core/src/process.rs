//! Process-level metrics appended to the exposition on request.
//!
//! On Linux the values come from `procfs`; if `/proc/self` cannot be read the
//! Linux series are skipped. Uptime is available everywhere.

use std::time::Instant;

use crate::exposition::SeriesValue;
use crate::series::SeriesKey;

/// Collect process series, sorted by name.
pub fn collect(started: Instant) -> Vec<(SeriesKey, SeriesValue)> {
    let mut out = Vec::new();

    #[cfg(target_os = "linux")]
    linux::collect(&mut out);

    out.push((
        SeriesKey::new("process_uptime_seconds", &[]),
        SeriesValue::Gauge(started.elapsed().as_secs_f64()),
    ));

    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[cfg(target_os = "linux")]
mod linux {
    use procfs::process::Process;

    use crate::exposition::SeriesValue;
    use crate::series::SeriesKey;

    pub(super) fn collect(out: &mut Vec<(SeriesKey, SeriesValue)>) {
        let me = match Process::myself() {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "procfs unavailable, skipping process metrics");
                return;
            }
        };

        if let Ok(stat) = me.stat() {
            let ticks = procfs::ticks_per_second() as f64;
            let cpu = (stat.utime + stat.stime) as f64 / ticks;
            out.push((
                SeriesKey::new("process_cpu_seconds_total", &[]),
                SeriesValue::FloatCounter(cpu),
            ));
            out.push(gauge("process_virtual_memory_bytes", stat.vsize as f64));
            out.push(gauge(
                "process_resident_memory_bytes",
                (stat.rss * procfs::page_size()) as f64,
            ));
            out.push(gauge("process_threads", stat.num_threads as f64));
        }

        if let Ok(fds) = me.fd_count() {
            out.push(gauge("process_open_fds", fds as f64));
        }
    }

    fn gauge(name: &str, v: f64) -> (SeriesKey, SeriesValue) {
        (SeriesKey::new(name, &[]), SeriesValue::Gauge(v))
    }
}
