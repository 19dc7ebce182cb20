//! Run Configuration

use rankbench_report::OutputFormat;
use regex::Regex;

/// Iteration budget applied to every benchmark unless overridden.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Configuration for one orchestrator run.
#[derive(Debug)]
pub struct RunConfig {
    /// Fixed iteration budget for every benchmark this run.
    pub iterations: u64,
    /// How the root rank renders the report.
    pub format: OutputFormat,
    /// Only benchmarks whose name matches run; `None` runs everything.
    pub filter: Option<Regex>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            format: OutputFormat::Human,
            filter: None,
        }
    }
}
