#![warn(missing_docs)]
//! Rankbench Communicator Seam
//!
//! The harness never talks to a message-passing runtime directly; everything
//! it needs from one is behind the [`Communicator`] trait:
//! - process identity (`rank`, `size`)
//! - a collective barrier
//! - a max all-reduce (used by max-across-ranks timing)
//!
//! Two implementations ship with the workspace: [`SingleProcess`] for
//! non-distributed builds (rank 0 of 1, every collective degenerates to a
//! no-op) and [`ThreadedGroup`], an in-process multi-rank group backed by
//! OS threads that gives tests and demos real lockstep semantics without an
//! external launcher.

mod threaded;

pub use threaded::{ThreadedComm, ThreadedGroup};

use thiserror::Error;

/// The rank that reports results and hosts root-only timing.
pub const ROOT_RANK: usize = 0;

/// Failure of a collective or identity operation.
///
/// Collectives have no partial-failure recovery story: the harness treats
/// any of these as fatal for the benchmark that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommError {
    /// A barrier could not complete.
    #[error("barrier failed on rank {rank}: {reason}")]
    Barrier {
        /// Rank observing the failure.
        rank: usize,
        /// Runtime-specific description.
        reason: String,
    },
    /// A reduction could not complete.
    #[error("reduction failed on rank {rank}: {reason}")]
    Reduce {
        /// Rank observing the failure.
        rank: usize,
        /// Runtime-specific description.
        reason: String,
    },
}

/// Minimal collective surface required by the harness.
///
/// Benchmark bodies may downcast-free use the same handle for rank-dependent
/// logic (e.g. a ping-pong body branching on `rank()`).
pub trait Communicator: Send + Sync {
    /// Zero-based index of this participant.
    fn rank(&self) -> usize;

    /// Total number of participants.
    fn size(&self) -> usize;

    /// Block until every participant has arrived.
    fn barrier(&self) -> Result<(), CommError>;

    /// Combine one `f64` per participant into the maximum, visible to all.
    fn all_reduce_max(&self, value: f64) -> Result<f64, CommError>;

    /// Whether this participant is the reporting rank.
    fn is_root(&self) -> bool {
        self.rank() == ROOT_RANK
    }
}

/// Degenerate communicator for non-distributed runs: rank 0 of 1.
///
/// Barriers return immediately and reductions are the identity, so a
/// single-process binary runs the full harness unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl SingleProcess {
    /// Create the single-process communicator.
    pub fn new() -> Self {
        Self
    }
}

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) -> Result<(), CommError> {
        Ok(())
    }

    fn all_reduce_max(&self, value: f64) -> Result<f64, CommError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_process_identity() {
        let comm = SingleProcess::new();
        assert_eq!(comm.rank(), 0);
        assert_eq!(comm.size(), 1);
        assert!(comm.is_root());
    }

    #[test]
    fn test_single_process_collectives_degenerate() {
        let comm = SingleProcess::new();
        assert!(comm.barrier().is_ok());
        assert_eq!(comm.all_reduce_max(42.5).unwrap(), 42.5);
    }
}
