//! Benchmark Orchestration
//!
//! Drives a registry to completion against a communicator: per benchmark,
//! materialize a fresh timer from its policy, barrier all ranks so nobody
//! starts early, run the body through the iteration protocol, finalize the
//! timer (triggering any cross-rank reduction), and derive the report
//! entry. Every rank executes the full loop and returns the same report
//! skeleton; only the root rank's timings are meaningful under root-only
//! timing, and only the root rank prints.

use crate::config::RunConfig;
use rankbench_comm::{CommError, Communicator};
use rankbench_core::{Registry, State, Timer, TimerError};
use rankbench_report::{BenchReport, Report, ReportMeta};
use thiserror::Error;

/// Fatal orchestration failure, naming the offending benchmark.
///
/// There is no per-benchmark recovery: collectives have already been torn
/// out from under the other ranks, so the run stops here.
#[derive(Debug, Error)]
pub enum RunError {
    /// The pre-run synchronization barrier failed.
    #[error("benchmark `{name}` failed to synchronize at start: {source}")]
    StartSync {
        /// Benchmark being started.
        name: String,
        /// Underlying collective failure.
        source: CommError,
    },
    /// A barrier failed while the benchmark was iterating.
    #[error("benchmark `{name}` failed during iteration: {source}")]
    Iteration {
        /// Benchmark being iterated.
        name: String,
        /// Underlying collective failure.
        source: CommError,
    },
    /// The timer's cross-rank aggregation failed.
    #[error("benchmark `{name}` failed to finalize its timer: {source}")]
    Finalize {
        /// Benchmark being finalized.
        name: String,
        /// Underlying timer failure.
        source: TimerError,
    },
}

/// Execute every registered benchmark, in registration order, and collect
/// the per-benchmark measurements.
pub fn run_benchmarks(
    registry: &Registry,
    comm: &dyn Communicator,
    config: &RunConfig,
) -> Result<Report, RunError> {
    let mut results = Vec::with_capacity(registry.len());

    for benchmark in registry.benchmarks() {
        if let Some(filter) = &config.filter {
            if !filter.is_match(benchmark.name()) {
                continue;
            }
        }
        if comm.is_root() {
            tracing::info!(benchmark = benchmark.name(), "running");
        }

        let mut timer = Timer::for_policy(benchmark.timing_policy(), comm.rank());
        let mut state = State::new(
            config.iterations,
            &mut timer,
            benchmark.iter_barrier(),
            comm,
        );

        // No rank starts until every rank is here.
        comm.barrier().map_err(|source| RunError::StartSync {
            name: benchmark.name().to_string(),
            source,
        })?;

        benchmark.run(&mut state);

        if let Some(err) = state.error() {
            return Err(RunError::Iteration {
                name: benchmark.name().to_string(),
                source: err.clone(),
            });
        }
        let bytes_processed = state.bytes_processed();
        drop(state);

        timer.finalize(comm).map_err(|source| RunError::Finalize {
            name: benchmark.name().to_string(),
            source,
        })?;

        results.push(BenchReport::from_measurement(
            benchmark.name(),
            config.iterations,
            timer.elapsed_ns(),
            bytes_processed,
        ));
    }

    Ok(Report {
        meta: ReportMeta::now(comm.size(), config.iterations),
        results,
    })
}
