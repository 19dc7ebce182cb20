#![warn(missing_docs)]
//! # Rankbench
//!
//! Micro-benchmark harness for distributed, multi-process workloads.
//!
//! Rankbench measures per-iteration time for named benchmark routines while
//! keeping cross-process synchronization out of the measurement:
//! - **Barrier-gated iteration**: ranks run in lockstep, with the timer
//!   paused around every inter-iteration barrier
//! - **Pluggable timing**: root-rank-only wall time, per-rank wall time, or
//!   a max-across-ranks reduction that reports the slowest participant
//! - **Communicator seam**: the message-passing runtime sits behind one
//!   trait; a single-process build degenerates to rank 0 of 1, and an
//!   in-process threaded group drives multi-rank tests
//! - **Throughput reporting**: bodies declare bytes moved per iteration
//!
//! ## Quick Start
//!
//! ```no_run
//! use rankbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         BenchmarkBuilder::new("empty", |state| {
//!             for _ in state.iter() {}
//!         })
//!         .timing_root_rank()
//!         .no_iter_barrier(),
//!     );
//!     rankbench::run(&registry)
//! }
//! ```

// Re-export core types
pub use rankbench_core::{
    Benchmark, BenchmarkBuilder, BenchmarkFn, Iter, Registry, State, Timer, TimerError,
    TimingPolicy,
};

// Re-export the communicator seam
pub use rankbench_comm::{
    CommError, Communicator, ROOT_RANK, SingleProcess, ThreadedComm, ThreadedGroup,
};

// Re-export reporting
pub use rankbench_report::{
    BenchReport, OutputFormat, Report, ReportMeta, format_bench_line, format_human_report,
    generate_json_report,
};

// Re-export orchestration
pub use rankbench_cli::{Cli, DEFAULT_ITERATIONS, RunConfig, RunError, run_benchmarks};

/// Run the rankbench CLI harness over a registry.
///
/// Call this from your benchmark binary's `main()`.
pub use rankbench_cli::run;

/// Run the harness against an explicit communicator, for binaries launched
/// under a multi-process runtime.
pub use rankbench_cli::run_distributed;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkBuilder, Communicator, Registry, RunConfig, SingleProcess, State, ThreadedGroup,
        TimingPolicy, run, run_benchmarks,
    };
}
