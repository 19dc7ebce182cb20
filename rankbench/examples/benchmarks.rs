//! Example benchmark binary.
//!
//! Run with `cargo run --example benchmarks --release`. Single-process, so
//! every collective degenerates; the same registry would run unchanged
//! against a multi-process communicator via `rankbench::run_distributed`.

use rankbench::prelude::*;

fn main() -> anyhow::Result<()> {
    let mut registry = Registry::new();

    // Empty loop: measures pure harness overhead on the root rank.
    registry.register(
        BenchmarkBuilder::new("empty", |state| {
            for _ in state.iter() {}
        })
        .timing_root_rank()
        .no_iter_barrier(),
    );

    // Summation loop with throughput: 8 bytes accumulated per iteration.
    registry.register(
        BenchmarkBuilder::new("sum", |state| {
            let mut acc = 0u64;
            for _ in state.iter() {
                acc = std::hint::black_box(acc.wrapping_add(1));
            }
            state.set_bytes_processed(8);
        })
        .timing_wall()
        .no_iter_barrier(),
    );

    // Lockstep copy: barrier between iterations, worst-rank timing.
    registry.register(
        BenchmarkBuilder::new("copy1k", |state| {
            let src = vec![1u8; 1000];
            let mut dst = vec![0u8; 1000];
            for _ in state.iter() {
                dst.copy_from_slice(std::hint::black_box(&src));
            }
            state.set_bytes_processed(1000 * state.comm().size() as u64);
        })
        .timing_max_rank(),
    );

    rankbench::run(&registry)
}
