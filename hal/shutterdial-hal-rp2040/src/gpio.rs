//! Edge-triggered GPIO inputs

use embassy_rp::gpio::{AnyPin, Flex, Pull as RpPull};
use embassy_rp::Peri;
use shutterdial_hal::{EdgeInput, EdgeTrigger, InputPin, Pull};

/// GPIO input that can be awaited for edges
///
/// The pin is an input from construction; [`EdgeInput::configure`] applies
/// the bias and picks which edges [`wait_for_edge`](Self::wait_for_edge)
/// waits on.
pub struct RpEdgeInput<'d> {
    pin: Flex<'d>,
    trigger: Option<EdgeTrigger>,
}

impl<'d> RpEdgeInput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_as_input();
        Self { pin, trigger: None }
    }

    /// Wait for the next edge matching the configured trigger
    ///
    /// An unconfigured pin waits for any edge.
    pub async fn wait_for_edge(&mut self) {
        match self.trigger {
            Some(EdgeTrigger::Falling) => self.pin.wait_for_falling_edge().await,
            Some(EdgeTrigger::Rising) => self.pin.wait_for_rising_edge().await,
            Some(EdgeTrigger::Any) | None => self.pin.wait_for_any_edge().await,
        }
    }
}

impl InputPin for RpEdgeInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl EdgeInput for RpEdgeInput<'_> {
    fn configure(&mut self, pull: Pull, trigger: EdgeTrigger) {
        self.pin.set_pull(match pull {
            Pull::None => RpPull::None,
            Pull::Up => RpPull::Up,
            Pull::Down => RpPull::Down,
        });
        self.trigger = Some(trigger);
    }

    fn trigger(&self) -> Option<EdgeTrigger> {
        self.trigger
    }
}
