//! Software pins for testing code written against the GPIO traits

use crate::gpio::{EdgeInput, EdgeTrigger, InputPin, Pull};

/// Input pin whose level is set by the test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockInput {
    high: bool,
    pull: Pull,
    trigger: Option<EdgeTrigger>,
    configure_calls: u8,
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInput {
    /// A pin idling high, as a pulled-up encoder contact does
    pub const fn new() -> Self {
        Self {
            high: true,
            pull: Pull::None,
            trigger: None,
            configure_calls: 0,
        }
    }

    /// Drive the pin to `high`
    pub fn set_level(&mut self, high: bool) {
        self.high = high;
    }

    /// Drive the pin high
    pub fn set_high(&mut self) {
        self.high = true;
    }

    /// Drive the pin low
    pub fn set_low(&mut self) {
        self.high = false;
    }

    /// The bias applied by the last `configure` call
    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// How many times `configure` has been called
    pub fn configure_calls(&self) -> u8 {
        self.configure_calls
    }
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.high
    }
}

impl EdgeInput for MockInput {
    fn configure(&mut self, pull: Pull, trigger: EdgeTrigger) {
        self.pull = pull;
        self.trigger = Some(trigger);
        self.configure_calls = self.configure_calls.saturating_add(1);
    }

    fn trigger(&self) -> Option<EdgeTrigger> {
        self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_idles_high() {
        let pin = MockInput::new();
        assert!(pin.is_high());
        assert!(!pin.is_low());
        assert_eq!(pin.trigger(), None);
    }

    #[test]
    fn test_mock_configure() {
        let mut pin = MockInput::new();
        pin.configure(Pull::Up, EdgeTrigger::Falling);
        assert_eq!(pin.pull(), Pull::Up);
        assert_eq!(pin.trigger(), Some(EdgeTrigger::Falling));
        assert_eq!(pin.configure_calls(), 1);
    }
}
