use rand::{RngCore, SeedableRng};

/// Modulus of seed congruence, 2^31 - 1.
pub const SEED_MODULUS: i64 = (1 << 31) - 1;

/// A source of uniformly distributed 31-bit nonnegative integers.
pub trait IntSource {
    /// Returns a value in `[0, 2^31 - 1]`.
    fn next_int31(&mut self) -> u32;
}

/// An [`IntSource`] that can be put back into a deterministic state.
///
/// Seeds with the same remainder modulo [`SEED_MODULUS`] must produce the
/// same sequence.
pub trait SeedableSource: IntSource {
    fn seed(&mut self, seed: i64);
}

impl<S: IntSource + ?Sized> IntSource for &mut S {
    fn next_int31(&mut self) -> u32 {
        (**self).next_int31()
    }
}

/// Reduces a seed into `[0, SEED_MODULUS)`, negative seeds included.
pub fn normalize_seed(seed: i64) -> i64 {
    seed.rem_euclid(SEED_MODULUS)
}

/// Adapts any `rand` generator into a [`SeedableSource`].
///
/// Seeds are normalised before reaching `R::seed_from_u64`, so congruent
/// seeds collapse to the same stream whatever `R` is.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore + SeedableRng> RngSource<R> {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: R::seed_from_u64(normalize_seed(seed) as u64),
        }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> IntSource for RngSource<R> {
    fn next_int31(&mut self) -> u32 {
        self.rng.next_u32() >> 1
    }
}

impl<R: RngCore + SeedableRng> SeedableSource for RngSource<R> {
    fn seed(&mut self, seed: i64) {
        self.rng = R::seed_from_u64(normalize_seed(seed) as u64);
    }
}

/// Borrowed `rand` generator used as a one-shot [`IntSource`].
pub(crate) struct Borrowed<'a, R: ?Sized>(pub(crate) &'a mut R);

impl<R: RngCore + ?Sized> IntSource for Borrowed<'_, R> {
    fn next_int31(&mut self) -> u32 {
        self.0.next_u32() >> 1
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::{IntSource, SeedableSource};

    /// Replays a fixed list of draws, cycling when exhausted.
    pub(crate) struct Scripted {
        draws: Vec<u32>,
        pos: usize,
        pub(crate) calls: usize,
    }

    impl Scripted {
        pub(crate) fn new(draws: &[u32]) -> Self {
            assert!(!draws.is_empty());
            Self {
                draws: draws.to_vec(),
                pos: 0,
                calls: 0,
            }
        }
    }

    impl IntSource for Scripted {
        fn next_int31(&mut self) -> u32 {
            let value = self.draws[self.pos] & 0x7FFF_FFFF;
            self.pos = (self.pos + 1) % self.draws.len();
            self.calls += 1;
            value
        }
    }

    impl SeedableSource for Scripted {
        fn seed(&mut self, _seed: i64) {
            self.pos = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn normalize_seed_is_euclidean() {
        assert_eq!(normalize_seed(0), 0);
        assert_eq!(normalize_seed(42), 42);
        assert_eq!(normalize_seed(SEED_MODULUS), 0);
        assert_eq!(normalize_seed(SEED_MODULUS + 42), 42);
        assert_eq!(normalize_seed(-1), SEED_MODULUS - 1);
        assert!(normalize_seed(i64::MIN) >= 0);
        assert!(normalize_seed(i64::MAX) < SEED_MODULUS);
    }

    #[test]
    fn rng_source_stays_in_31_bits() {
        let mut src = RngSource::<StdRng>::new(7);
        for _ in 0..10_000 {
            assert!(src.next_int31() < 1 << 31);
        }
    }

    #[test]
    fn rng_source_congruent_seeds() {
        let mut a = RngSource::<StdRng>::new(-5);
        let mut b = RngSource::<StdRng>::new(-5 + 3 * SEED_MODULUS);
        for _ in 0..1000 {
            assert_eq!(a.next_int31(), b.next_int31());
        }
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn draw<S: IntSource>(mut src: S) -> u32 {
            src.next_int31()
        }
        let mut inner = RngSource::<StdRng>::new(1);
        let mut copy = inner.clone();
        assert_eq!(draw(&mut inner), copy.next_int31());
        assert_eq!(inner.next_int31(), copy.next_int31());
    }

    #[test]
    fn into_inner_returns_the_seeded_rng() {
        let mut rng = RngSource::<StdRng>::new(3 + SEED_MODULUS).into_inner();
        let mut expected = StdRng::seed_from_u64(3);
        assert_eq!(rng.next_u64(), expected.next_u64());
    }

    #[test]
    fn rng_source_reseed_restarts() {
        let mut src = RngSource::<StdRng>::new(11);
        let first: Vec<u32> = (0..16).map(|_| src.next_int31()).collect();
        src.seed(11);
        let again: Vec<u32> = (0..16).map(|_| src.next_int31()).collect();
        assert_eq!(first, again);
    }
}
