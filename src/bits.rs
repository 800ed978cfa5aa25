use crate::source::IntSource;

/// Bits handed out per integer draw.
pub const BITS_PER_DRAW: u8 = 31;

/// Hands out single random bits, 31 per integer draw, least significant first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitBuffer {
    buf: u32,
    count: u8,
}

impl BitBuffer {
    pub const fn new() -> Self {
        Self { buf: 0, count: 0 }
    }

    pub fn next_bit<S: IntSource + ?Sized>(&mut self, src: &mut S) -> bool {
        if self.count == 0 {
            self.buf = src.next_int31();
            self.count = BITS_PER_DRAW;
        }
        let bit = self.buf & 1;
        self.buf >>= 1;
        self.count -= 1;
        bit != 0
    }

    /// Number of buffered bits not yet handed out.
    pub fn remaining(&self) -> u8 {
        self.count
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
