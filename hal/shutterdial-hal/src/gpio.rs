//! GPIO pin abstractions
//!
//! Provides traits for the digital inputs an encoder is wired to. Chip
//! HALs implement them on top of their own pin types.

/// Internal bias resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Internal pull-up (line idles high, contact pulls it low)
    Up,
    /// Internal pull-down
    Down,
}

/// Which electrical transitions raise an interrupt on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeTrigger {
    /// Any level change (used for the quadrature channels)
    #[default]
    Any,
    /// High to low only (used for the push-button)
    Falling,
    /// Low to high only
    Rising,
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Digital input that can be biased and armed for edge interrupts
///
/// `configure` is called once at start-up. Calling it again with the same
/// arguments must leave the pin in the same state.
pub trait EdgeInput: InputPin {
    /// Apply the bias resistor and enable interrupt delivery for `trigger`
    fn configure(&mut self, pull: Pull, trigger: EdgeTrigger);

    /// The trigger the pin was last armed with, if any
    fn trigger(&self) -> Option<EdgeTrigger>;
}
