//! Operation trace model and output sinks.
//!
//! Each stress operation emits exactly one [`TraceRecord`], tagged with the
//! operation class and the value involved, whether or not the underlying set
//! operation succeeded. Records from different workers interleave in whatever
//! order the scheduler produces; consumers may rely on per-thread monotonicity
//! only.
//!
//! [`StderrSink`] is the production sink: one `"<class> - <value>"` line per
//! record on stderr, keeping the trace stream separate from the stdout report.
//! [`MemorySink`] accumulates records in memory for tests.

use std::fmt;
use std::io::Write;

use parking_lot::Mutex;

/// Operation class tag, encoded as its wire digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpKind {
    /// An insertion attempt.
    Insert = 0,
    /// A removal attempt.
    Remove = 1,
    /// A membership lookup.
    Lookup = 2,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// One attempted operation: class tag plus the value involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation class.
    pub kind: OpKind,
    /// The integer value the operation targeted.
    pub val: i64,
}

impl TraceRecord {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(kind: OpKind, val: i64) -> Self {
        Self { kind, val }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind, self.val)
    }
}

/// Destination for trace output, shared by all workers.
///
/// Implementations must tolerate concurrent calls; workers invoke `record`
/// from their own threads without external coordination.
pub trait TraceSink: Send + Sync {
    /// Emits one record for an attempted operation.
    fn record(&self, record: TraceRecord);

    /// Emits the values inserted during the populate phase, in order.
    fn population(&self, values: &[i64]);
}

/// Production sink: one line per record on stderr.
#[derive(Debug, Default)]
pub struct StderrSink;

impl StderrSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TraceSink for StderrSink {
    fn record(&self, record: TraceRecord) {
        // eprintln locks stderr per call, so lines never tear even though
        // their interleaving across threads is nondeterministic.
        eprintln!("{record}");
    }

    fn population(&self, values: &[i64]) {
        let mut err = std::io::stderr().lock();
        for v in values {
            let _ = write!(err, "{v}, ");
        }
        let _ = writeln!(err);
    }
}

/// Test sink: accumulates everything under a mutex.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<TraceRecord>>,
    population: Mutex<Vec<i64>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record seen so far.
    #[must_use]
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.lock().clone()
    }

    /// Returns the populate-phase values.
    #[must_use]
    pub fn population_values(&self) -> Vec<i64> {
        self.population.lock().clone()
    }
}

impl TraceSink for MemorySink {
    fn record(&self, record: TraceRecord) {
        self.records.lock().push(record);
    }

    fn population(&self, values: &[i64]) {
        self.population.lock().extend_from_slice(values);
    }
}
