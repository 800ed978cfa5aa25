//! Float construction: exponent by geometric search, then a uniform mantissa.

use lazy_static::lazy_static;

use crate::bits::BitBuffer;
use crate::source::IntSource;

pub const MANTISSA_BITS: u32 = 23;
pub const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;

lazy_static! {
    /// Exponent field of 0.0.
    pub static ref LOW_EXP: u32 = exponent_field(0.0);
    /// Exponent field of 1.0.
    pub static ref HIGH_EXP: u32 = exponent_field(1.0);
}

/// Biased 8-bit exponent field of `value`.
pub fn exponent_field(value: f32) -> u32 {
    (value.to_bits() >> MANTISSA_BITS) & 0xFF
}

/// Assembles a non-negative float from an exponent field and a mantissa field.
pub fn from_parts(exp: u32, mantissa: u32) -> f32 {
    debug_assert!(exp <= 0xFF && mantissa <= MANTISSA_MASK);
    f32::from_bits((exp << MANTISSA_BITS) | mantissa)
}

/// Draws one value from [0.0, 1.0].
///
/// Each exponent below that of 1.0 is reached with half the probability of
/// the one above it, which is the share of [0, 1] its binade covers. A zero
/// mantissa sits on the boundary shared with the binade above, so it is moved
/// up half of the time. That step also makes 1.0 reachable.
pub fn sample<S: IntSource + ?Sized>(bits: &mut BitBuffer, src: &mut S) -> f32 {
    let (low, high) = (*LOW_EXP, *HIGH_EXP);

    let mut exp = high - 1;
    while exp > low {
        if bits.next_bit(src) {
            break;
        }
        exp -= 1;
    }
    if exp == low {
        tracing::trace!("exponent search reached the subnormal range");
    }

    let mantissa = src.next_int31() & MANTISSA_MASK;

    if mantissa == 0 && bits.next_bit(src) {
        exp += 1;
    }

    from_parts(exp, mantissa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::scripted::Scripted;

    fn draw(script: &[u32]) -> f32 {
        let mut src = Scripted::new(script);
        sample(&mut BitBuffer::new(), &mut src)
    }

    #[test]
    fn exponent_constants() {
        assert_eq!(*LOW_EXP, 0);
        assert_eq!(*HIGH_EXP, 127);
        assert_eq!(exponent_field(0.5), 126);
        assert_eq!(exponent_field(f32::MIN_POSITIVE), 1);
    }

    #[test]
    fn first_bit_set_gives_upper_half() {
        // bit 1, then mantissa 0x7FFFFF
        let v = draw(&[1, 0x7F_FFFF]);
        assert_eq!(v, 1.0 - f32::EPSILON / 2.0);
    }

    #[test]
    fn exact_one() {
        // bits 1,1: stop at 126, mantissa 0, correction bit 1
        assert_eq!(draw(&[0b11, 0]), 1.0);
    }

    #[test]
    fn exact_half_without_correction() {
        // bits 1,0: stop at 126, mantissa 0, correction bit 0
        assert_eq!(draw(&[0b01, 0]), 0.5);
    }

    #[test]
    fn exact_zero() {
        // every bit and every mantissa is zero
        let v = draw(&[0]);
        assert_eq!(v.to_bits(), 0);
    }

    #[test]
    fn smallest_normal_from_bottomed_out_search() {
        // 126 zero bits end two bits into the fifth draw; the sixth is the
        // mantissa, and the correction bit is bit 2 of the fifth draw
        let v = draw(&[0, 0, 0, 0, 0b100, 0]);
        assert_eq!(v, f32::MIN_POSITIVE);
    }

    #[test]
    fn subnormal() {
        let v = draw(&[0, 0, 0, 0, 0, 5]);
        assert!(v.is_subnormal());
        assert_eq!(v.to_bits(), 5);
    }

    #[test]
    fn exponent_counts_leading_zero_bits() {
        // bits 0,0,0,1 stop at 126 - 3 = 123
        let v = draw(&[0b1000, 0x40_0000]);
        assert_eq!(exponent_field(v), 123);
        assert_eq!(v.to_bits() & MANTISSA_MASK, 0x40_0000);
    }

    #[test]
    fn mantissa_uses_a_fresh_draw() {
        let mut src = Scripted::new(&[0x7FFF_FFFF, 0x12_3456]);
        let mut bits = BitBuffer::new();
        let v = sample(&mut bits, &mut src);
        assert_eq!(src.calls, 2);
        assert_eq!(bits.remaining(), 30);
        assert_eq!(v.to_bits(), (126 << 23) | 0x12_3456);
    }

    #[test]
    fn mantissa_keeps_only_low_23_bits() {
        let v = draw(&[1, 0x7F80_0001]);
        assert_eq!(v.to_bits(), (126 << 23) | 1);
    }

    #[test]
    fn from_parts_assembles() {
        assert_eq!(from_parts(127, 0), 1.0);
        assert_eq!(from_parts(0, 0), 0.0);
        assert_eq!(from_parts(126, 1 << 22), 0.75);
    }
}
