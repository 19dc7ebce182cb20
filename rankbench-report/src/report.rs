//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete report for one harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata.
    pub meta: ReportMeta,
    /// One entry per executed benchmark, in registration order.
    pub results: Vec<BenchReport>,
}

/// Run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    /// Number of participating ranks.
    pub ranks: usize,
    /// Iteration budget applied to every benchmark this run.
    pub iterations: u64,
}

impl ReportMeta {
    /// Metadata for a run starting now.
    pub fn now(ranks: usize, iterations: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            ranks,
            iterations,
        }
    }
}

/// Measured result of one benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    /// Benchmark name.
    pub name: String,
    /// Iterations executed.
    pub iterations: u64,
    /// Mean nanoseconds per iteration.
    pub ns_per_iter: f64,
    /// Throughput in bytes per second, when the body declared a nonzero
    /// bytes-processed figure.
    pub bytes_per_sec: Option<f64>,
}

impl BenchReport {
    /// Derive the per-iteration and throughput figures from a finalized
    /// timer reading and the body's bytes-processed declaration.
    ///
    /// A zero-iteration budget reports 0ns rather than dividing by zero,
    /// and throughput needs both nonzero bytes and nonzero measured time.
    pub fn from_measurement(
        name: impl Into<String>,
        iterations: u64,
        total_elapsed_ns: f64,
        bytes_processed: u64,
    ) -> Self {
        let ns_per_iter = if iterations == 0 {
            0.0
        } else {
            total_elapsed_ns / iterations as f64
        };
        let secs_per_iter = ns_per_iter / 1e9;
        let bytes_per_sec = if bytes_processed != 0 && secs_per_iter > 0.0 {
            Some(bytes_processed as f64 / secs_per_iter)
        } else {
            None
        };
        Self {
            name: name.into(),
            iterations,
            ns_per_iter,
            bytes_per_sec,
        }
    }
}
