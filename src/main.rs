//! `tracegen` — concurrent integer-set stress harness.
//!
//! Prints the run configuration and final counters on stdout and emits one
//! trace line per operation on stderr. Exit code is 0 when the measured set
//! size matches the counter-implied size, 1 on a mismatch, 2 on a rejected
//! configuration.
//!
//! ```bash
//! # 4 workers, 100k ops each, redirect the trace stream to a file
//! cargo run --release -- -n 4 -o 100000 2> trace.txt
//!
//! # With diagnostics (writes NDJSON to logs/tracegen.json)
//! RUST_LOG=tracegen=debug cargo run --features tracing -- -n 4
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use tracegen::config::{
    Config, DEFAULT_INITIAL_SIZE, DEFAULT_NUM_THREADS, DEFAULT_OPERATIONS, DEFAULT_SEED,
    DEFAULT_UPDATE_RATE,
};
use tracegen::driver;
use tracegen::trace::StderrSink;

#[cfg(feature = "tracing")]
type TracingGuard = tracing_appender::non_blocking::WorkerGuard;

#[cfg(not(feature = "tracing"))]
type TracingGuard = ();

/// Installs an NDJSON file subscriber for diagnostics, filtered by
/// `RUST_LOG`. Diagnostics go to a log file so they never pollute the
/// stderr trace stream.
#[cfg(feature = "tracing")]
fn init_json_tracing() -> TracingGuard {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_dir = "logs";
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, "tracegen.json");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_thread_ids(true)
        .with_target(true)
        .with_ansi(false)
        .json()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    guard
}

#[cfg(not(feature = "tracing"))]
fn init_json_tracing() -> TracingGuard {}

#[derive(Parser, Debug)]
#[command(
    name = "tracegen",
    version,
    about = "Generates an operation trace by stressing a shared integer set"
)]
struct Cli {
    /// Do not alternate insertions and removals
    #[arg(short = 'a', long = "do-not-alternate")]
    do_not_alternate: bool,

    /// Number of operations per thread
    #[arg(short, long, default_value_t = DEFAULT_OPERATIONS)]
    operations: i64,

    /// Number of elements to insert before the test
    #[arg(short, long, default_value_t = DEFAULT_INITIAL_SIZE)]
    initial_size: i64,

    /// Number of worker threads
    #[arg(short, long, default_value_t = DEFAULT_NUM_THREADS)]
    num_threads: i64,

    /// Range of integer values inserted in the set (default: twice the
    /// initial size)
    #[arg(short, long)]
    range: Option<i64>,

    /// RNG seed (0 = time-based)
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Percentage of update operations
    #[arg(short, long, default_value_t = DEFAULT_UPDATE_RATE)]
    update_rate: i64,
}

impl Cli {
    fn into_config(self) -> Result<Config, tracegen::ConfigError> {
        let mut builder = Config::builder()
            .operations(self.operations)
            .initial_size(self.initial_size)
            .num_threads(self.num_threads)
            .seed(self.seed)
            .update_rate(self.update_rate)
            .alternate(!self.do_not_alternate);
        if let Some(range) = self.range {
            builder = builder.range(range);
        }
        builder.build()
    }
}

#[allow(clippy::cast_possible_wrap)]
fn print_config(config: &Config) {
    println!("Operations   : {}", config.operations);
    println!("Initial size : {}", config.initial_size);
    println!("Nb threads   : {}", config.num_threads);
    println!("Value range  : {}", config.range);
    println!("Seed         : {}", config.seed);
    println!("Update rate  : {}", config.update_rate);
    println!("Alternate    : {}", u8::from(config.alternate));

    if !config.alternate && config.range != (config.initial_size as i64) * 2 {
        println!("WARNING: range is not twice the initial set size");
    }
}

fn main() -> ExitCode {
    let _guard = init_json_tracing();

    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tracegen: invalid configuration: {e}");
            return ExitCode::from(2);
        }
    };

    print_config(&config);
    println!("Adding {} entries to set", config.initial_size);

    let report = driver::run(&config, Arc::new(StderrSink::new()));

    println!("Set size     : {}", report.populated_size);
    for (i, stats) in report.per_thread.iter().enumerate() {
        println!("Thread {i}");
        println!("  #add        : {}", stats.adds);
        println!("  #remove     : {}", stats.removes);
        println!("  #contains   : {}", stats.lookups);
        println!("  #found      : {}", stats.found);
    }
    println!(
        "Set size      : {} (expected: {})",
        report.actual_size, report.expected_size
    );

    if report.consistent() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
