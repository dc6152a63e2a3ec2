//! Wall-clock instrumentation for the pipeline entry points.
//!
//! Timing is explicit function wrapping, not a parallel implementation:
//! [`MetricRegistry::time`] runs the real operation, attributes the
//! elapsed time to a named metric in a caller-owned registry, and
//! forwards the return value untouched. A `Result` (or a panic) passes
//! straight through; the wrapper never suppresses or translates a
//! failure. Repeated calls against the same name aggregate.

use std::fmt::Write;
use std::time::{Duration, Instant};

/// Runs an operation and returns its result with the elapsed wall-clock
/// time, for callers that attribute nested sub-timings themselves via
/// [`MetricRegistry::record`].
pub fn timed<T>(op: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = op();
    (result, start.elapsed())
}

/// Formats a duration the way the perf report prints it: seconds above
/// one second, milliseconds above one millisecond, microseconds below.
pub fn format_time(elapsed: Duration, digits: usize) -> String {
    let millis = elapsed.as_secs_f64() * 1_000.0;
    if millis >= 1_000.0 {
        format!("{:.*}s", digits, millis / 1_000.0)
    } else if millis >= 1.0 {
        format!("{:.*}ms", digits, millis)
    } else {
        format!("{:.*}μs", digits, millis * 1_000.0)
    }
}

/// One aggregated metric: total elapsed time over every attributed call.
#[derive(Debug, Clone)]
struct Metric {
    name: &'static str,
    elapsed: Duration,
    calls: u64,
}

/// A caller-owned registry of aggregated timings.
///
/// One metric name is the root; at report time the root is printed first
/// and every other metric is itemized beneath it. There is no ambient
/// global state: whoever wants timings owns a registry and passes it
/// around explicitly.
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    root: &'static str,
    digits: usize,
    /// Insertion-ordered; a name appears once no matter how often it is hit.
    metrics: Vec<Metric>,
}

impl MetricRegistry {
    pub fn new(root: &'static str) -> Self {
        Self::with_digits(root, 3)
    }

    pub fn with_digits(root: &'static str, digits: usize) -> Self {
        MetricRegistry {
            root,
            digits,
            metrics: Vec::new(),
        }
    }

    /// Runs `op`, attributes its elapsed time to `name`, and forwards the
    /// return value unchanged.
    pub fn time<T>(&mut self, name: &'static str, op: impl FnOnce() -> T) -> T {
        let (result, elapsed) = timed(op);
        self.record(name, elapsed);
        result
    }

    /// Adds an externally measured duration to a metric.
    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        match self.metrics.iter_mut().find(|m| m.name == name) {
            Some(metric) => {
                metric.elapsed += elapsed;
                metric.calls += 1;
            }
            None => self.metrics.push(Metric {
                name,
                elapsed,
                calls: 1,
            }),
        }
    }

    /// Total time attributed to a metric so far.
    pub fn elapsed(&self, name: &str) -> Option<Duration> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.elapsed)
    }

    /// How many calls have been attributed to a metric so far.
    pub fn calls(&self, name: &str) -> u64 {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.calls)
            .unwrap_or(0)
    }

    /// Renders the aggregate report: the root metric first, child metrics
    /// itemized under it.
    pub fn report(&self) -> String {
        let root_elapsed = self.elapsed(self.root).unwrap_or(Duration::ZERO);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} took {}",
            self.root,
            format_time(root_elapsed, self.digits)
        );
        for metric in &self.metrics {
            if metric.name == self.root {
                continue;
            }
            let _ = writeln!(
                out,
                "  - {} took {}",
                metric.name,
                format_time(metric.elapsed, self.digits)
            );
        }
        out
    }
}
