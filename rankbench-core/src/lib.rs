#![warn(missing_docs)]
//! Rankbench Core - Timing and Iteration Protocol
//!
//! This crate provides the measurement machinery of the harness:
//! - `Timer` strategies (wall clock, max-across-ranks, no-op) behind a
//!   per-benchmark `TimingPolicy`
//! - The `State`/`Iter` iteration protocol that gates each benchmark
//!   iteration behind an optional distributed barrier while keeping
//!   barrier wait time out of the measurement
//! - `Benchmark` descriptors, their fluent builder, and the `Registry`
//!
//! The communication primitives it synchronizes against live behind
//! [`rankbench_comm::Communicator`]; the orchestration loop that drives a
//! registry to completion lives in `rankbench-cli`.

mod bench;
mod state;
mod timer;

pub use bench::{Benchmark, BenchmarkBuilder, BenchmarkFn, Registry};
pub use state::{Iter, State};
pub use timer::{Timer, TimerError, TimingPolicy};
