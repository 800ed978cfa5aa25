//! Uniformly distributed `f32` values over the closed interval [0, 1].
//!
//! Values are built directly from random bits: the exponent is chosen so each
//! binade is hit in proportion to its width, then the mantissa is chosen
//! uniformly, with a correction at binade boundaries. Every representable
//! value in [0, 1] can be produced, subnormals and both endpoints included.
//!
//! See A. B. Downey, "Generating Pseudo-random Floating-Point Values" (2007).
//!
//! ```
//! let mut rng = randf::Rand::new();
//! rng.seed(42);
//! let x = rng.float32();
//! assert!((0.0..=1.0).contains(&x));
//! ```

pub mod alfg;
pub mod bits;
mod cooked;
pub mod dist;
pub mod float;
pub mod source;

pub use alfg::LaggedFibonacci;
pub use bits::BitBuffer;
pub use dist::Closed01;
pub use source::{normalize_seed, IntSource, RngSource, SeedableSource, SEED_MODULUS};

/// Seed used by [`Rand::new`].
pub const DEFAULT_SEED: i64 = 1;

/// A stream of random floats over [0, 1].
///
/// One instance is one stream. It is not shareable between threads without a
/// lock; give each thread its own instance instead.
#[derive(Debug, Clone)]
pub struct Rand<S = LaggedFibonacci> {
    bits: BitBuffer,
    src: S,
}

impl Rand<LaggedFibonacci> {
    /// A generator that behaves as if seeded with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_source(LaggedFibonacci::new(DEFAULT_SEED))
    }
}

impl Default for Rand<LaggedFibonacci> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: IntSource> Rand<S> {
    pub fn with_source(src: S) -> Self {
        Self {
            bits: BitBuffer::new(),
            src,
        }
    }

    /// Returns a random value in [0.0, 1.0], including 0.0, subnormals and 1.0.
    pub fn float32(&mut self) -> f32 {
        float::sample(&mut self.bits, &mut self.src)
    }

    pub fn bit(&mut self) -> bool {
        self.bits.next_bit(&mut self.src)
    }

    pub fn source(&self) -> &S {
        &self.src
    }

    pub fn into_source(self) -> S {
        self.src
    }
}

impl<S: SeedableSource> Rand<S> {
    /// Puts the generator into the deterministic state for `seed`.
    ///
    /// Buffered bits are discarded. Seeds with the same remainder modulo
    /// 2^31 - 1 give the same sequence.
    pub fn seed(&mut self, seed: i64) {
        tracing::debug!(seed, "reseeding");
        self.src.seed(seed);
        self.bits.clear();
    }
}
