//! Timer Strategies
//!
//! Elapsed time is accumulated as f64 nanoseconds across pause/resume
//! cycles. The strategy is a tagged variant chosen once, when a benchmark's
//! timer is materialized from its [`TimingPolicy`] — the per-iteration hot
//! path never does dynamic dispatch.

use rankbench_comm::Communicator;
use std::time::Instant;
use thiserror::Error;

/// How a benchmark's elapsed time is recorded and aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimingPolicy {
    /// No instrumentation anywhere (the registration default).
    #[default]
    NoOp,
    /// Local wall clock on every rank, no aggregation.
    Wall,
    /// Wall clock on the root rank only; every other rank gets a no-op
    /// timer and always reads 0.
    RootOnly,
    /// Wall clock on every rank; `finalize` replaces each rank's elapsed
    /// value with the maximum across all ranks, so every rank reports the
    /// slowest participant's time.
    MaxAcrossRanks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    NoOp,
    Wall,
    MaxAcrossRanks,
}

/// Timer misuse or a failed cross-rank aggregation.
#[derive(Debug, Error)]
pub enum TimerError {
    /// `finalize` was called more than once.
    #[error("timer already finalized")]
    AlreadyFinalized,
    /// The max reduction failed.
    #[error(transparent)]
    Comm(#[from] rankbench_comm::CommError),
}

/// Pause/resume accumulator for one benchmark execution.
///
/// `pause` while paused and `resume` while running are no-ops, so the
/// iteration protocol can sequence them without tracking timer state.
#[derive(Debug)]
pub struct Timer {
    kind: TimerKind,
    elapsed_ns: f64,
    started: Option<Instant>,
    finalized: bool,
}

impl Timer {
    fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            elapsed_ns: 0.0,
            started: None,
            finalized: false,
        }
    }

    /// Materialize the timer a policy prescribes for the given rank.
    pub fn for_policy(policy: TimingPolicy, rank: usize) -> Self {
        match policy {
            TimingPolicy::NoOp => Self::new(TimerKind::NoOp),
            TimingPolicy::Wall => Self::new(TimerKind::Wall),
            TimingPolicy::RootOnly if rank == rankbench_comm::ROOT_RANK => {
                Self::new(TimerKind::Wall)
            }
            TimingPolicy::RootOnly => Self::new(TimerKind::NoOp),
            TimingPolicy::MaxAcrossRanks => Self::new(TimerKind::MaxAcrossRanks),
        }
    }

    /// Stop accumulating. No-op if already paused.
    #[inline]
    pub fn pause(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed_ns += started.elapsed().as_nanos() as f64;
        }
    }

    /// Start accumulating. No-op if already running.
    #[inline]
    pub fn resume(&mut self) {
        if self.kind == TimerKind::NoOp {
            return;
        }
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Total accumulated nanoseconds. Pauses first, so the value is stable
    /// across repeated reads.
    pub fn elapsed_ns(&mut self) -> f64 {
        self.pause();
        self.elapsed_ns
    }

    /// One-time cross-rank aggregation, called after the last iteration and
    /// before the final elapsed read. For max-across-ranks timing every
    /// rank must call this or the reduction never completes.
    pub fn finalize(&mut self, comm: &dyn Communicator) -> Result<(), TimerError> {
        if self.finalized {
            return Err(TimerError::AlreadyFinalized);
        }
        self.pause();
        if self.kind == TimerKind::MaxAcrossRanks {
            self.elapsed_ns = comm.all_reduce_max(self.elapsed_ns)?;
        }
        self.finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankbench_comm::SingleProcess;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wall_timer_accumulates() {
        let mut timer = Timer::for_policy(TimingPolicy::Wall, 0);
        timer.resume();
        thread::sleep(Duration::from_millis(10));
        timer.pause();
        assert!(timer.elapsed_ns() >= 5_000_000.0);
    }

    #[test]
    fn test_paused_reads_are_stable() {
        let mut timer = Timer::for_policy(TimingPolicy::Wall, 0);
        timer.resume();
        thread::sleep(Duration::from_millis(5));
        timer.pause();
        let first = timer.elapsed_ns();
        thread::sleep(Duration::from_millis(5));
        let second = timer.elapsed_ns();
        assert_eq!(first, second);
    }

    #[test]
    fn test_elapsed_read_implicitly_pauses() {
        let mut timer = Timer::for_policy(TimingPolicy::Wall, 0);
        timer.resume();
        let first = timer.elapsed_ns();
        thread::sleep(Duration::from_millis(5));
        // Still paused from the read above.
        assert_eq!(timer.elapsed_ns(), first);
    }

    #[test]
    fn test_pause_and_resume_are_idempotent() {
        let mut timer = Timer::for_policy(TimingPolicy::Wall, 0);
        timer.pause();
        timer.pause();
        assert_eq!(timer.elapsed_ns(), 0.0);
        timer.resume();
        timer.resume();
        timer.pause();
        timer.pause();
        let elapsed = timer.elapsed_ns();
        timer.pause();
        assert_eq!(timer.elapsed_ns(), elapsed);
    }

    #[test]
    fn test_noop_timer_reads_zero() {
        let mut timer = Timer::for_policy(TimingPolicy::NoOp, 0);
        timer.resume();
        thread::sleep(Duration::from_millis(10));
        timer.pause();
        assert_eq!(timer.elapsed_ns(), 0.0);
    }

    #[test]
    fn test_root_only_is_noop_off_root() {
        let mut timer = Timer::for_policy(TimingPolicy::RootOnly, 3);
        timer.resume();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(timer.elapsed_ns(), 0.0);

        let mut root_timer = Timer::for_policy(TimingPolicy::RootOnly, 0);
        root_timer.resume();
        thread::sleep(Duration::from_millis(5));
        assert!(root_timer.elapsed_ns() > 0.0);
    }

    #[test]
    fn test_finalize_exactly_once() {
        let comm = SingleProcess::new();
        let mut timer = Timer::for_policy(TimingPolicy::Wall, 0);
        timer.finalize(&comm).unwrap();
        assert!(matches!(
            timer.finalize(&comm),
            Err(TimerError::AlreadyFinalized)
        ));
    }

    #[test]
    fn test_max_across_ranks_single_process_keeps_local_value() {
        let comm = SingleProcess::new();
        let mut timer = Timer::for_policy(TimingPolicy::MaxAcrossRanks, 0);
        timer.resume();
        thread::sleep(Duration::from_millis(5));
        timer.pause();
        let local = timer.elapsed_ns();
        timer.finalize(&comm).unwrap();
        assert_eq!(timer.elapsed_ns(), local);
    }
}
