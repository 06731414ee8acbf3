//! The stress driver: populate, spawn, rendezvous, execute, join, report.
//!
//! One driver thread plus `num_threads` workers. The driver populates the set
//! single-threaded, spawns every worker, then crosses the same barrier the
//! workers wait on so that all operation loops begin together. Workers run a
//! fixed operation budget to completion; there is no stop flag, timeout, or
//! cancellation path. After joining, the driver folds the per-worker counters
//! into a [`RunReport`] and measures the set one final time.
//!
//! Thread-spawn and join failures are fatal: the harness has no meaningful
//! partial result, so both panic with a diagnostic.

use std::sync::Arc;
use std::thread;
use std::time::SystemTime;

use crate::barrier::Barrier;
use crate::config::Config;
use crate::list::IntSet;
use crate::rand48::Rand48;
use crate::trace::{OpKind, TraceRecord, TraceSink};
use crate::tracing_helpers::{debug_log, info_log, warn_log};

/// Counters owned by one worker, read by the driver only after join.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkerStats {
    /// Insertion attempts (successful or not).
    pub adds: u64,
    /// Removal attempts (successful or not).
    pub removes: u64,
    /// Membership lookups.
    pub lookups: u64,
    /// Lookups that found their value.
    pub found: u64,
    /// Net size change produced: successful adds minus successful removes.
    pub diff: i64,
}

/// Everything one worker needs, owned exclusively for the whole run.
struct ThreadContext {
    set: Arc<IntSet>,
    barrier: Arc<Barrier>,
    rng: Rand48,
    operations: u64,
    range: i64,
    update_rate: i64,
    alternate: bool,
    sink: Arc<dyn TraceSink>,
}

/// Outcome of a full stress run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Set size after the populate phase, before any worker ran.
    pub populated_size: usize,
    /// Per-worker counters, in spawn order.
    pub per_thread: Vec<WorkerStats>,
    /// `populated_size` plus the sum of all worker size deltas.
    pub expected_size: i64,
    /// The set's measured size after all workers joined.
    pub actual_size: i64,
}

impl RunReport {
    /// Whether the measured size matches the counter-implied size.
    ///
    /// With more than one worker the unsynchronized set may have been
    /// corrupted by races; this is where that damage finally surfaces.
    #[must_use]
    pub const fn consistent(&self) -> bool {
        self.actual_size == self.expected_size
    }
}

/// Turns a zero seed into a time-based one; nonzero seeds pass through.
#[allow(clippy::cast_possible_truncation)]
fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    SystemTime::UNIX_EPOCH
        .elapsed()
        .map_or(1, |d| d.as_nanos() as u64)
}

/// Inserts `initial_size` distinct random values, retrying duplicate draws.
///
/// Termination relies on the validated `range >= initial_size` precondition;
/// draws that hit an already-present value do not count toward progress.
/// Returns the inserted values in insertion order.
fn populate(set: &IntSet, rng: &mut Rand48, config: &Config) -> Vec<i64> {
    let mut inserted = Vec::with_capacity(config.initial_size);
    while inserted.len() < config.initial_size {
        let val = rng.next_in_range(config.range) + 1;
        if set.add(val) {
            inserted.push(val);
        }
    }
    inserted
}

/// One worker's operation loop. Crosses the barrier, then burns through the
/// fixed operation budget against the shared set.
fn stress_loop(mut ctx: ThreadContext) -> WorkerStats {
    let mut stats = WorkerStats::default();
    // At most one outstanding inserted value in alternate mode.
    let mut last: Option<i64> = None;

    ctx.barrier.cross();

    for _ in 0..ctx.operations {
        let roll = ctx.rng.next_in_range(100);
        if roll < ctx.update_rate {
            if ctx.alternate {
                if let Some(val) = last.take() {
                    // Remove the value inserted by the previous update.
                    if ctx.set.remove(val) {
                        stats.diff -= 1;
                    }
                    stats.removes += 1;
                    ctx.sink.record(TraceRecord::new(OpKind::Remove, val));
                } else {
                    let val = ctx.rng.next_in_range(ctx.range) + 1;
                    if ctx.set.add(val) {
                        stats.diff += 1;
                        last = Some(val);
                    }
                    stats.adds += 1;
                    ctx.sink.record(TraceRecord::new(OpKind::Insert, val));
                }
            } else {
                // Counter and trace record are emitted whether or not the
                // underlying operation succeeds; consumers want the attempt.
                let val = ctx.rng.next_in_range(ctx.range) + 1;
                if roll & 1 == 0 {
                    if ctx.set.add(val) {
                        stats.diff += 1;
                    }
                    stats.adds += 1;
                    ctx.sink.record(TraceRecord::new(OpKind::Insert, val));
                } else {
                    if ctx.set.remove(val) {
                        stats.diff -= 1;
                    }
                    stats.removes += 1;
                    ctx.sink.record(TraceRecord::new(OpKind::Remove, val));
                }
            }
        } else {
            let val = ctx.rng.next_in_range(ctx.range) + 1;
            if ctx.set.contains(val) {
                stats.found += 1;
            }
            stats.lookups += 1;
            ctx.sink.record(TraceRecord::new(OpKind::Lookup, val));
        }
    }

    stats
}

/// Runs the whole stress scenario and returns the aggregated report.
///
/// The `config` must come from [`Config::builder`], so every precondition
/// (positive thread count, range covering the initial size, update rate in
/// bounds) already holds when threads are spawned.
///
/// # Panics
///
/// Panics if a worker thread cannot be spawned or joins with a panic; both
/// are fatal per the harness's error model.
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn run(config: &Config, sink: Arc<dyn TraceSink>) -> RunReport {
    let seed = resolve_seed(config.seed);
    let mut rng = Rand48::new(seed);
    let set = Arc::new(IntSet::new());

    info_log!(seed, threads = config.num_threads, "starting stress run");

    let inserted = populate(&set, &mut rng, config);
    sink.population(&inserted);
    let populated_size = set.len();
    debug_log!(populated_size, "populate phase complete");

    // Workers plus the driver all cross once before the stress phase.
    let barrier = Arc::new(Barrier::new(config.num_threads + 1));

    let handles: Vec<_> = (0..config.num_threads)
        .map(|i| {
            let ctx = ThreadContext {
                set: Arc::clone(&set),
                barrier: Arc::clone(&barrier),
                rng: rng.spawn(),
                operations: config.operations,
                range: config.range,
                update_rate: config.update_rate,
                alternate: config.alternate,
                sink: Arc::clone(&sink),
            };
            thread::Builder::new()
                .name(format!("worker-{i}"))
                .spawn(move || stress_loop(ctx))
                .unwrap_or_else(|e| panic!("failed to spawn worker thread {i}: {e}"))
        })
        .collect();

    // Release the workers.
    barrier.cross();

    let per_thread: Vec<WorkerStats> = handles
        .into_iter()
        .enumerate()
        .map(|(i, handle)| {
            handle
                .join()
                .unwrap_or_else(|_| panic!("worker thread {i} panicked"))
        })
        .collect();

    let expected_size =
        populated_size as i64 + per_thread.iter().map(|s| s.diff).sum::<i64>();
    let actual_size = set.len() as i64;
    if actual_size == expected_size {
        debug_log!(actual_size, "final size consistent");
    } else {
        warn_log!(actual_size, expected_size, "final size mismatch");
    }

    RunReport {
        populated_size,
        per_thread,
        expected_size,
        actual_size,
    }
}
