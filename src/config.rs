//! Run configuration, defaults, and validation.
//!
//! Every knob is validated before a single thread is spawned; a rejected
//! configuration has no side effects.

use thiserror::Error;

/// Default per-thread operation count.
pub const DEFAULT_OPERATIONS: i64 = 10_000;

/// Default number of entries inserted before the stress phase.
pub const DEFAULT_INITIAL_SIZE: i64 = 256;

/// Default worker thread count.
pub const DEFAULT_NUM_THREADS: i64 = 1;

/// Default RNG seed; `0` means derive the seed from the current time.
pub const DEFAULT_SEED: u64 = 0;

/// Default percentage of update (insert/remove) operations.
pub const DEFAULT_UPDATE_RATE: i64 = 20;

/// A configuration knob was out of range.
///
/// All variants are detected before any work begins; the process exits
/// without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Per-thread operation count was negative.
    #[error("operation count must be non-negative, got {0}")]
    NegativeOperations(i64),

    /// Initial population size was negative.
    #[error("initial size must be non-negative, got {0}")]
    NegativeInitialSize(i64),

    /// Worker thread count was zero or negative.
    #[error("thread count must be positive, got {0}")]
    NonPositiveThreads(i64),

    /// Value range was zero or negative.
    #[error("value range must be positive, got {0}")]
    NonPositiveRange(i64),

    /// Value range cannot hold the requested initial population.
    #[error("value range {range} is smaller than initial size {initial_size}")]
    RangeBelowInitialSize {
        /// Requested value range.
        range: i64,
        /// Requested initial population.
        initial_size: i64,
    },

    /// Update percentage was outside `[0, 100]`.
    #[error("update rate must be within 0..=100, got {0}")]
    UpdateRateOutOfBounds(i64),
}

/// A validated stress-run configuration.
///
/// Construct through [`Config::builder`]; the builder is the only path that
/// produces a `Config`, so holding one implies every bound below has been
/// checked.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operations each worker performs (≥ 0).
    pub operations: u64,
    /// Entries inserted before workers start (≥ 0).
    pub initial_size: usize,
    /// Worker thread count (> 0).
    pub num_threads: usize,
    /// Values are drawn from `[1, range]` (> 0, ≥ `initial_size`).
    pub range: i64,
    /// RNG seed; `0` means time-based.
    pub seed: u64,
    /// Percentage of operations that are updates (0..=100).
    pub update_rate: i64,
    /// Whether each worker alternates insert and remove of the same value.
    pub alternate: bool,
}

impl Config {
    /// Starts a builder with every knob at its default.
    #[must_use]
    pub const fn builder() -> ConfigBuilder {
        ConfigBuilder {
            operations: DEFAULT_OPERATIONS,
            initial_size: DEFAULT_INITIAL_SIZE,
            num_threads: DEFAULT_NUM_THREADS,
            range: None,
            seed: DEFAULT_SEED,
            update_rate: DEFAULT_UPDATE_RATE,
            alternate: true,
        }
    }
}

/// Builder for [`Config`]; `build` performs all validation.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    operations: i64,
    initial_size: i64,
    num_threads: i64,
    range: Option<i64>,
    seed: u64,
    update_rate: i64,
    alternate: bool,
}

impl ConfigBuilder {
    /// Sets the per-thread operation count.
    #[must_use]
    pub const fn operations(mut self, operations: i64) -> Self {
        self.operations = operations;
        self
    }

    /// Sets the initial population size.
    #[must_use]
    pub const fn initial_size(mut self, initial_size: i64) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Sets the worker thread count.
    #[must_use]
    pub const fn num_threads(mut self, num_threads: i64) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Sets the value range; when unset, `build` uses twice the initial size.
    #[must_use]
    pub const fn range(mut self, range: i64) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets the RNG seed (`0` = time-based).
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the update percentage.
    #[must_use]
    pub const fn update_rate(mut self, update_rate: i64) -> Self {
        self.update_rate = update_rate;
        self
    }

    /// Enables or disables alternate mode.
    #[must_use]
    pub const fn alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    /// Validates every knob and produces the final [`Config`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, checked in the order
    /// the knobs are listed on [`Config`].
    #[allow(clippy::cast_sign_loss)]
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.operations < 0 {
            return Err(ConfigError::NegativeOperations(self.operations));
        }
        if self.initial_size < 0 {
            return Err(ConfigError::NegativeInitialSize(self.initial_size));
        }
        if self.num_threads <= 0 {
            return Err(ConfigError::NonPositiveThreads(self.num_threads));
        }
        let range = self.range.unwrap_or(self.initial_size * 2);
        if range <= 0 {
            return Err(ConfigError::NonPositiveRange(range));
        }
        if range < self.initial_size {
            return Err(ConfigError::RangeBelowInitialSize {
                range,
                initial_size: self.initial_size,
            });
        }
        if !(0..=100).contains(&self.update_rate) {
            return Err(ConfigError::UpdateRateOutOfBounds(self.update_rate));
        }
        Ok(Config {
            operations: self.operations as u64,
            initial_size: self.initial_size as usize,
            num_threads: self.num_threads as usize,
            range,
            seed: self.seed,
            update_rate: self.update_rate,
            alternate: self.alternate,
        })
    }
}
