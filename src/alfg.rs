use rand::{RngCore, SeedableRng};

use crate::cooked::RNG_COOKED;
use crate::source::{normalize_seed, IntSource, SeedableSource, SEED_MODULUS};

const LONG_LAG: usize = 607;
const SHORT_LAG: usize = 273;
const WARMUP: usize = 20;
// replaces a zero seed, which would leave the Lehmer generator stuck at zero
const ZERO_SEED: i64 = 89_482_311;
const MASK_63: u64 = (1 << 63) - 1;

/// Additive lagged Fibonacci generator, x(n) = x(n-607) + x(n-273) mod 2^64.
///
/// The state words are filled from a Lehmer minimal standard generator and
/// masked with a fixed table, so seeds congruent modulo 2^31 - 1 give
/// identical streams. The output matches Go's `math/rand` source word for word.
#[derive(Clone)]
pub struct LaggedFibonacci {
    tap: usize,
    feed: usize,
    state: [u64; LONG_LAG], // generator state
}

impl Default for LaggedFibonacci {
    fn default() -> Self {
        Self::new(1)
    }
}

impl std::fmt::Debug for LaggedFibonacci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaggedFibonacci")
            .field("tap", &self.tap)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl LaggedFibonacci {
    pub fn new(seed: i64) -> LaggedFibonacci {
        let mut generator = Self {
            tap: 0,
            feed: LONG_LAG - SHORT_LAG,
            state: [0; LONG_LAG],
        };
        generator.initialize_state(seed);
        generator
    }

    fn initialize_state(&mut self, seed: i64) {
        self.tap = 0;
        self.feed = LONG_LAG - SHORT_LAG;
        let mut x = match normalize_seed(seed) {
            0 => ZERO_SEED,
            s => s,
        };
        for _ in 0..WARMUP {
            x = lehmer(x);
        }
        for (word, cooked) in self.state.iter_mut().zip(RNG_COOKED) {
            x = lehmer(x);
            let mut u = (x as u64) << 40;
            x = lehmer(x);
            u ^= (x as u64) << 20;
            x = lehmer(x);
            u ^= x as u64;
            *word = u ^ cooked as u64;
        }
    }

    pub fn step(&mut self) -> u64 {
        self.tap = self.tap.checked_sub(1).unwrap_or(LONG_LAG - 1);
        self.feed = self.feed.checked_sub(1).unwrap_or(LONG_LAG - 1);
        let x = self.state[self.feed].wrapping_add(self.state[self.tap]);
        self.state[self.feed] = x;
        x
    }
}

/// One step of the minimal standard generator x * 48271 mod (2^31 - 1),
/// using Schrage's method to stay within 32 bits.
fn lehmer(x: i64) -> i64 {
    const A: i64 = 48_271;
    const Q: i64 = 44_488; // M / A
    const R: i64 = 3_399; // M % A
    let hi = x / Q;
    let lo = x % Q;
    let x = A * lo - R * hi;
    if x < 0 {
        x + SEED_MODULUS
    } else {
        x
    }
}

impl IntSource for LaggedFibonacci {
    fn next_int31(&mut self) -> u32 {
        ((self.step() & MASK_63) >> 32) as u32
    }
}

impl SeedableSource for LaggedFibonacci {
    fn seed(&mut self, seed: i64) {
        self.initialize_state(seed);
    }
}

impl RngCore for LaggedFibonacci {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for LaggedFibonacci {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}
