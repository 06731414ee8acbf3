//! Deterministic 48-bit linear congruential generator.
//!
//! Each worker thread owns one [`Rand48`], seeded independently from the
//! driver's generator, so concurrent streams never share state and never
//! correlate. Given the same seed, a stream replays the same sequence, which
//! makes single-threaded traces fully reproducible.
//!
//! The recurrence is the classic `drand48` family:
//! `x' = (a * x + c) mod 2^48` with `a = 0x5DEE_CE66D`, `c = 0xB`. State is
//! the low 48 bits of a `u64`, equivalent to the traditional three 16-bit
//! words.

/// Multiplier of the 48-bit LCG step.
const MULTIPLIER: u64 = 0x5DEE_CE66D;

/// Increment of the 48-bit LCG step.
const INCREMENT: u64 = 0xB;

/// Keeps only the low 48 bits of the state.
const STATE_MASK: u64 = (1 << 48) - 1;

/// Low 16 bits of a freshly seeded state, as `srand48` sets them.
const SEED_PAD: u64 = 0x330E;

/// A 48-bit LCG random stream owned by exactly one thread.
#[derive(Debug, Clone)]
pub struct Rand48 {
    state: u64,
}

impl Rand48 {
    /// Creates a stream from a 32-bit-style seed: the seed fills the high
    /// 32 bits of the 48-bit state and the low word is a fixed pad.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: ((seed << 16) | SEED_PAD) & STATE_MASK,
        }
    }

    /// Creates a stream from explicit state words, low word first.
    #[must_use]
    pub const fn from_words(words: [u16; 3]) -> Self {
        Self {
            state: words[0] as u64 | ((words[1] as u64) << 16) | ((words[2] as u64) << 32),
        }
    }

    /// Advances the state and returns the full 48-bit output.
    fn next48(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & STATE_MASK;
        self.state
    }

    /// Returns a uniform value in `[0, n)`.
    ///
    /// The 48-bit output is mapped into the range with a widening
    /// multiply-shift, so the result is provably below `n` for every draw.
    ///
    /// # Panics
    ///
    /// Panics if `n <= 0`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn next_in_range(&mut self, n: i64) -> i64 {
        assert!(n > 0, "range bound must be positive, got {n}");
        let x = self.next48();
        ((u128::from(x) * n as u128) >> 48) as i64
    }

    /// Derives an independently seeded child stream by drawing three state
    /// words from `self`. Used by the driver to hand each worker its own
    /// stream at spawn time.
    pub fn spawn(&mut self) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let word = |rng: &mut Self| (rng.next48() >> 16) as u16;
        let words = [word(self), word(self), word(self)];
        Self::from_words(words)
    }
}
