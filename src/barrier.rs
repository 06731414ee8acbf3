//! Reusable rendezvous barrier.
//!
//! All participants (the worker threads plus the driver) block in
//! [`Barrier::cross`] until the configured quota has arrived, then release
//! together. The final arrival resets the count, so the same barrier can
//! coordinate a later phase without reconstruction.
//!
//! There is no timeout and no cancellation: a participant that never crosses
//! stalls every other participant indefinitely. That failure mode is accepted
//! for this harness and must not be papered over with deadlines.

use parking_lot::{Condvar, Mutex};

/// Arrival state guarded by the barrier's mutex.
struct Inner {
    /// Participants currently waiting at the barrier.
    arrived: usize,
    /// Bumped on every release; waiters block until it changes, which makes
    /// the barrier immune to spurious wakeups and safe to reuse.
    generation: u64,
}

/// A rendezvous point for a fixed number of participants.
pub struct Barrier {
    total: usize,
    inner: Mutex<Inner>,
    /// Condvar paired with `inner` (required by [`parking_lot`] API).
    released: Condvar,
}

impl Barrier {
    /// Creates a barrier for `total` participants.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero.
    #[must_use]
    pub fn new(total: usize) -> Self {
        assert!(total > 0, "barrier needs at least one participant");
        Self {
            total,
            inner: Mutex::new(Inner {
                arrived: 0,
                generation: 0,
            }),
            released: Condvar::new(),
        }
    }

    /// Blocks until `total` participants (including this one) have crossed.
    ///
    /// The final arrival wakes all waiters and resets the arrival count to
    /// zero, leaving the barrier ready for another rendezvous.
    pub fn cross(&self) {
        let mut inner = self.inner.lock();
        inner.arrived += 1;
        if inner.arrived == self.total {
            inner.arrived = 0;
            inner.generation += 1;
            self.released.notify_all();
        } else {
            let generation = inner.generation;
            while inner.generation == generation {
                self.released.wait(&mut inner);
            }
        }
    }

    /// The configured participant quota.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

impl std::fmt::Debug for Barrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Barrier")
            .field("total", &self.total)
            .field("arrived", &inner.arrived)
            .field("generation", &inner.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Barrier;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn single_participant_never_blocks() {
        let barrier = Barrier::new(1);
        barrier.cross();
        barrier.cross();
    }

    #[test]
    fn releases_only_after_last_arrival() {
        const THREADS: usize = 4;
        let barrier = Arc::new(Barrier::new(THREADS + 1));
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let before = Arc::clone(&before);
                let after = Arc::clone(&after);
                thread::spawn(move || {
                    before.fetch_add(1, Ordering::SeqCst);
                    barrier.cross();
                    after.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        // Wait until every worker is parked at the barrier.
        while before.load(Ordering::SeqCst) < THREADS {
            thread::yield_now();
        }
        assert_eq!(after.load(Ordering::SeqCst), 0, "released before quota");

        barrier.cross();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(after.load(Ordering::SeqCst), THREADS);
    }

    #[test]
    fn reset_allows_reuse() {
        const THREADS: usize = 3;
        const ROUNDS: usize = 5;
        let barrier = Arc::new(Barrier::new(THREADS));
        let rounds_done = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let rounds_done = Arc::clone(&rounds_done);
                thread::spawn(move || {
                    for _ in 0..ROUNDS {
                        barrier.cross();
                        rounds_done.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(rounds_done.load(Ordering::SeqCst), THREADS * ROUNDS);
    }
}
