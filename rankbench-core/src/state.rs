//! Iteration Protocol
//!
//! A benchmark body iterates over its [`State`] exactly once; the iterator
//! it gets back drives the pause/barrier/resume sequencing that keeps
//! cross-rank synchronization out of the measurement:
//!
//! 1. `start` resumes the timer before the first body runs.
//! 2. Every termination check — including the first, before any body —
//!    pauses the timer, barriers all ranks (when enabled), and resumes.
//! 3. Zero remaining pauses the timer one last time and stops.
//! 4. `advance` pauses the timer right after the body (barrier case) and
//!    decrements the remaining count.
//!
//! A consequence worth pinning: a zero-iteration, barrier-enabled run still
//! performs exactly one barrier. That leading barrier is what synchronizes
//! benchmark start across ranks.

use crate::timer::Timer;
use rankbench_comm::{CommError, Communicator};

/// One benchmark execution's iteration budget and instrumentation.
///
/// Constructed fresh per benchmark invocation by the orchestrator and
/// consumed once via [`State::iter`].
pub struct State<'a> {
    iterations: u64,
    bytes_processed: u64,
    error: Option<CommError>,
    timer: &'a mut Timer,
    iter_barrier: bool,
    comm: &'a dyn Communicator,
}

impl<'a> State<'a> {
    /// Bind an iteration budget to a benchmark's timer and barrier policy.
    pub fn new(
        iterations: u64,
        timer: &'a mut Timer,
        iter_barrier: bool,
        comm: &'a dyn Communicator,
    ) -> Self {
        Self {
            iterations,
            bytes_processed: 0,
            error: None,
            timer,
            iter_barrier,
            comm,
        }
    }

    /// The fixed iteration budget.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Declare how many bytes one iteration moves; enables throughput
    /// reporting. Last write wins; 0 means "throughput not applicable".
    pub fn set_bytes_processed(&mut self, bytes: u64) {
        self.bytes_processed = bytes;
    }

    /// Bytes-per-iteration figure declared by the body, if any.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// The communicator, for rank-dependent benchmark bodies.
    pub fn comm(&self) -> &dyn Communicator {
        self.comm
    }

    /// Communication failure recorded during iteration, if any. A body
    /// whose loop ended early should be assumed unmeasured when this is
    /// set; the orchestrator turns it into a fatal, named diagnostic.
    pub fn error(&self) -> Option<&CommError> {
        self.error.as_ref()
    }

    /// Iterate the budget. Yields exactly `iterations()` tokens, fewer if
    /// a collective fails mid-run (see [`State::error`]).
    pub fn iter(&mut self) -> Iter<'_, 'a> {
        let remaining = self.iterations;
        let iter_barrier = self.iter_barrier;
        Iter {
            state: self,
            remaining,
            iter_barrier,
            started: false,
            done: false,
        }
    }
}

/// Cursor over a [`State`]'s iteration budget.
///
/// The protocol operations are public so the sequencing is testable on its
/// own; `Iterator::next` just composes them.
pub struct Iter<'s, 'a> {
    state: &'s mut State<'a>,
    // cached off the State so the hot path doesn't chase it
    remaining: u64,
    iter_barrier: bool,
    started: bool,
    done: bool,
}

impl Iter<'_, '_> {
    /// Begin measuring. The timer starts before the first body executes.
    #[inline]
    pub fn start(&mut self) {
        self.state.timer.resume();
        self.started = true;
    }

    /// Barrier (when enabled, timer paused around it), then decide whether
    /// another iteration runs. Pauses the timer for good on termination.
    #[inline]
    pub fn should_continue(&mut self) -> bool {
        if self.iter_barrier {
            self.state.timer.pause();
            if let Err(err) = self.state.comm.barrier() {
                self.state.error = Some(err);
                self.done = true;
                return false;
            }
            self.state.timer.resume();
        }
        if self.remaining != 0 {
            true
        } else {
            self.state.timer.pause();
            self.done = true;
            false
        }
    }

    /// Step past a completed body: pause the timer ahead of the next
    /// check's barrier and consume one unit of budget.
    #[inline]
    pub fn advance(&mut self) {
        if self.iter_barrier {
            self.state.timer.pause();
        }
        self.remaining -= 1;
    }
}

impl Iterator for Iter<'_, '_> {
    type Item = ();

    #[inline]
    fn next(&mut self) -> Option<()> {
        if self.done {
            return None;
        }
        if self.started {
            self.advance();
        } else {
            self.start();
        }
        if self.should_continue() { Some(()) } else { None }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let remaining = self.remaining as usize;
            (remaining, Some(remaining))
        }
    }
}
