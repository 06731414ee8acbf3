//! Common test utilities: tracing setup for integration tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code ...
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: filter directives (e.g. `tracegen=debug`)
//! - `TRACEGEN_LOG_DIR`: log directory (default: `logs/`)
//! - `TRACEGEN_LOG_CONSOLE`: set to "0" to disable console output
//!
//! Logs are written to `logs/tracegen-tests.jsonl` as newline-delimited JSON.

#![allow(dead_code)]

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(setup_tracing);
}

fn log_dir() -> PathBuf {
    env::var("TRACEGEN_LOG_DIR").map_or_else(|_| PathBuf::from("logs"), PathBuf::from)
}

fn console_enabled() -> bool {
    env::var("TRACEGEN_LOG_CONSOLE").map_or(true, |v| v != "0")
}

/// Create an `EnvFilter` from `RUST_LOG` or fall back to the default level.
fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

fn setup_tracing() {
    let dir = log_dir();
    std::fs::create_dir_all(&dir).expect("Failed to create log directory");

    // Open in append mode; nextest runs tests in separate processes.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tracegen-tests.jsonl"))
        .expect("Failed to open log file");

    let console_layer = if console_enabled() {
        Some(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_target(true)
                .compact()
                .with_filter(make_filter(Level::INFO)),
        )
    } else {
        None
    };

    // NDJSON file layer; use `jq` for pretty-printing.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_thread_ids(true)
        .with_target(true)
        .json()
        .with_filter(make_filter(Level::INFO));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
