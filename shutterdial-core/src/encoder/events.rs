//! Events produced by the encoder decoder

/// Rotation direction of one quadrature step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Channel A leads channel B
    Clockwise,
    /// Channel B leads channel A
    CounterClockwise,
}

impl Direction {
    /// Signed step for this direction (+1 or -1)
    pub const fn delta(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Clean input event handed from the decoder to the option model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderEvent {
    /// One accepted quadrature step
    Rotate(Direction),
    /// Push-button pressed
    Select,
}

impl EncoderEvent {
    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, EncoderEvent::Rotate(_))
    }

    /// Returns true if this is a button event
    pub fn is_select(&self) -> bool {
        matches!(self, EncoderEvent::Select)
    }

    /// Returns the rotation direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            EncoderEvent::Rotate(direction) => direction.delta(),
            EncoderEvent::Select => 0,
        }
    }
}
