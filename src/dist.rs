use rand::distributions::Distribution;
use rand::Rng;

use crate::bits::BitBuffer;
use crate::float;
use crate::source::Borrowed;

/// Samples `f32` values uniformly from the closed interval [0, 1] using any
/// `rand` generator.
///
/// Unlike [`Rand`](crate::Rand) no bits are carried over between samples, so
/// unused bits of the last draw are dropped.
///
/// ```
/// use rand::Rng;
/// use randf::{Closed01, LaggedFibonacci};
///
/// let mut rng = LaggedFibonacci::new(7);
/// let x: f32 = rng.sample(Closed01);
/// assert!((0.0..=1.0).contains(&x));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Closed01;

impl Distribution<f32> for Closed01 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        float::sample(&mut BitBuffer::new(), &mut Borrowed(rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::Closed01;
    use crate::LaggedFibonacci;

    #[test]
    fn all_zero_rng_gives_zero() {
        let mut zeros = StepRng::new(0, 0);
        assert_eq!(zeros.sample(Closed01), 0.0);
    }

    #[test]
    fn all_ones_rng_gives_largest_below_one() {
        let mut ones = StepRng::new(u64::MAX, 0);
        assert_eq!(ones.sample(Closed01), 1.0 - f32::EPSILON / 2.0);
    }

    #[test]
    fn samples_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for v in (&mut rng).sample_iter(Closed01).take(100_000) {
            assert!((0.0..=1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn reproducible_with_lagged_fibonacci() {
        let a: Vec<f32> = LaggedFibonacci::new(3).sample_iter(Closed01).take(500).collect();
        let b: Vec<f32> = LaggedFibonacci::new(3).sample_iter(Closed01).take(500).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn upper_half_is_half() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 200_000;
        let upper = (0..n).filter(|_| rng.sample(Closed01) >= 0.5).count();
        let fraction = upper as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.01, "{fraction}");
    }
}
