//! Zero-cost diagnostic logging helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing`
//! crate; without it they compile to nothing, so the stress loops carry no
//! logging overhead by default.
//!
//! Diagnostics are deliberately separate from the operation trace stream:
//! trace records go to the [`crate::trace::TraceSink`], while these macros
//! feed the NDJSON log file installed by the binary.
//!
//! ```bash
//! RUST_LOG=tracegen=debug cargo run --features tracing -- -n 4
//! ```

#![allow(unused_macros, unused_imports)]

/// Debug-level logging. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

/// Info-level logging. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! info_log {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! info_log {
    ($($arg:tt)*) => {};
}

/// Warn-level logging. No-op without the `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use info_log;
pub(crate) use warn_log;
