//! In-Process Multi-Rank Group
//!
//! One OS thread per rank, sharing a [`std::sync::Barrier`] and a slot
//! vector for reductions. This gives the harness real lockstep semantics
//! (a rank genuinely blocks until all peers arrive) without an external
//! process launcher, which is exactly what the protocol tests need.

use crate::{CommError, Communicator};
use std::sync::{Arc, Barrier, Mutex};

struct Shared {
    size: usize,
    barrier: Barrier,
    slots: Mutex<Vec<f64>>,
}

/// A group of `size` in-process ranks.
///
/// Hand one [`ThreadedComm`] per rank to one thread per rank; collectives
/// block until every rank's thread participates.
pub struct ThreadedGroup {
    shared: Arc<Shared>,
}

impl ThreadedGroup {
    /// Create a group of `size` ranks. `size` must be at least 1.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "a group needs at least one rank");
        Self {
            shared: Arc::new(Shared {
                size,
                barrier: Barrier::new(size),
                slots: Mutex::new(vec![0.0; size]),
            }),
        }
    }

    /// Communicator handle for one rank of this group.
    pub fn comm(&self, rank: usize) -> ThreadedComm {
        assert!(rank < self.shared.size, "rank {rank} out of range");
        ThreadedComm {
            rank,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Run `f` once per rank, each on its own thread, and collect the
    /// per-rank results in rank order. A panic on any rank propagates.
    pub fn run<F, R>(size: usize, f: F) -> Vec<R>
    where
        F: Fn(ThreadedComm) -> R + Sync,
        R: Send,
    {
        let group = ThreadedGroup::new(size);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..size)
                .map(|rank| {
                    let comm = group.comm(rank);
                    let f = &f;
                    scope.spawn(move || f(comm))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(value) => value,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        })
    }
}

/// One rank's handle into a [`ThreadedGroup`].
pub struct ThreadedComm {
    rank: usize,
    shared: Arc<Shared>,
}

impl Communicator for ThreadedComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.size
    }

    fn barrier(&self) -> Result<(), CommError> {
        self.shared.barrier.wait();
        Ok(())
    }

    fn all_reduce_max(&self, value: f64) -> Result<f64, CommError> {
        {
            let mut slots = self.shared.slots.lock().map_err(|_| CommError::Reduce {
                rank: self.rank,
                reason: "reduction slots poisoned by a panicked rank".to_string(),
            })?;
            slots[self.rank] = value;
        }
        // All contributions visible before anyone reads.
        self.barrier()?;
        let max = {
            let slots = self.shared.slots.lock().map_err(|_| CommError::Reduce {
                rank: self.rank,
                reason: "reduction slots poisoned by a panicked rank".to_string(),
            })?;
            slots.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        };
        // All reads done before the slots can be reused.
        self.barrier()?;
        Ok(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_group_identity() {
        let results = ThreadedGroup::run(4, |comm| (comm.rank(), comm.size(), comm.is_root()));
        assert_eq!(results.len(), 4);
        for (rank, (r, s, root)) in results.iter().enumerate() {
            assert_eq!(*r, rank);
            assert_eq!(*s, 4);
            assert_eq!(*root, rank == 0);
        }
    }

    #[test]
    fn test_max_reduce_visible_on_every_rank() {
        let results = ThreadedGroup::run(4, |comm| {
            let contribution = (comm.rank() as f64 + 1.0) * 10.0;
            comm.all_reduce_max(contribution).unwrap()
        });
        assert_eq!(results, vec![40.0; 4]);
    }

    #[test]
    fn test_repeated_reductions_do_not_bleed() {
        let results = ThreadedGroup::run(3, |comm| {
            let first = comm.all_reduce_max(comm.rank() as f64).unwrap();
            let second = comm.all_reduce_max(-(comm.rank() as f64)).unwrap();
            (first, second)
        });
        for (first, second) in results {
            assert_eq!(first, 2.0);
            assert_eq!(second, 0.0);
        }
    }

    #[test]
    fn test_barrier_releases_all_ranks() {
        let arrived = AtomicUsize::new(0);
        ThreadedGroup::run(4, |comm| {
            arrived.fetch_add(1, Ordering::SeqCst);
            comm.barrier().unwrap();
            // Nobody gets past the barrier until everyone arrived.
            assert_eq!(arrived.load(Ordering::SeqCst), 4);
        });
    }
}
