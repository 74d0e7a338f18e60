//! Gray-code transition table for two-channel quadrature signals
//!
//! Only one channel may change between two consecutive samples. Clockwise
//! rotation (A leads B) walks the sequence `11 → 01 → 00 → 10 → 11`;
//! counter-clockwise walks it backwards. Both bits flipping at once cannot
//! happen on a healthy encoder and is reported as a glitch.

use super::events::Direction;

/// Sampled (A, B) level pair, A in bit 1 and B in bit 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels(u8);

impl Levels {
    /// Both channels high: the detent position of a pulled-up encoder
    pub const IDLE: Levels = Levels(0b11);

    /// Pack two channel levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Channel A level
    pub const fn a(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Channel B level
    pub const fn b(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Packed 2-bit value
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Result of comparing two consecutive level pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// One valid quadrature step
    Step(Direction),
    /// Levels did not change
    Unchanged,
    /// Both channels changed at once
    Glitch,
}

use Direction::{Clockwise as Cw, CounterClockwise as Ccw};
use Transition::{Glitch as G, Step, Unchanged as U};

// Indexed by (previous << 2) | current
#[rustfmt::skip]
const TABLE: [Transition; 16] = [
    // previous 00
    U, Step(Ccw), Step(Cw), G,
    // previous 01
    Step(Cw), U, G, Step(Ccw),
    // previous 10
    Step(Ccw), G, U, Step(Cw),
    // previous 11
    G, Step(Cw), Step(Ccw), U,
];

/// Resolve the transition from `previous` to `current`
pub fn decode(previous: Levels, current: Levels) -> Transition {
    TABLE[((previous.bits() << 2) | current.bits()) as usize]
}
