//! # `tracegen`
//!
//! A concurrent integer-set stress harness and operation-trace generator.
//!
//! A barrier-synchronized group of worker threads hammers a shared sorted
//! linked-list set with randomized insert/remove/lookup operations. Every
//! operation emits one trace record; after all workers finish, the driver
//! checks the set's measured size against the size implied by the per-thread
//! counters. The traces feed downstream transactional-memory and concurrency
//! analysis tools.
//!
//! ## The set races on purpose
//!
//! [`list::IntSet`] performs **no locking and no atomic ordering**. With more
//! than one worker thread, concurrent structural mutation can and will corrupt
//! the chain (lost updates, use-after-free). That is the point: the harness
//! generates traces of genuinely racy executions for tools that analyze such
//! interleavings. Do not add synchronization inside the set.
//!
//! | Component | Module | Synchronization |
//! |-----------|--------|-----------------|
//! | Sorted set | [`list`] | None (intentional) |
//! | Random stream | [`rand48`] | Thread-owned, none needed |
//! | Rendezvous barrier | [`barrier`] | Mutex + condvar |
//! | Stress driver | [`driver`] | Barrier + join only |
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tracegen::config::Config;
//! use tracegen::driver;
//! use tracegen::trace::MemorySink;
//!
//! let config = Config::builder().num_threads(1).operations(1000).build()?;
//! let sink = Arc::new(MemorySink::new());
//! let report = driver::run(&config, sink);
//! assert!(report.consistent());
//! # Ok::<(), tracegen::config::ConfigError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod barrier;
pub mod config;
pub mod driver;
pub mod list;
pub mod rand48;
pub mod trace;

mod tracing_helpers;

pub use barrier::Barrier;
pub use config::{Config, ConfigError};
pub use driver::{RunReport, WorkerStats};
pub use list::IntSet;
pub use rand48::Rand48;
pub use trace::{MemorySink, OpKind, StderrSink, TraceRecord, TraceSink};
