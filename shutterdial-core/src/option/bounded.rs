//! Bounded option values

use core::fmt;

use heapless::Vec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::OptionError;
use super::{make_title, Title};
use crate::encoder::EncoderEvent;

/// Maximum number of alternate values per option
pub const MAX_ALTERNATES: usize = 3;

/// Which end of a range to query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    Min,
    Max,
}

/// What happens when the dial runs off either end of the alternate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlternatePolicy {
    /// Stop at the first and last alternate
    #[default]
    Clamp,
    /// Continue from the other end
    Wrap,
}

/// Result of pressing the button on an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectOutcome {
    /// Value kept, the option is done editing
    Confirm,
    /// Value reset to zero
    Zeroed {
        /// Value before the reset
        previous: i32,
    },
}

/// A numeric setting adjusted by the dial
///
/// Rotation moves the value by `delta * multiplier`, saturating into the
/// range when one is set. In alternate mode the dial instead walks a short
/// list of preset values and [`get_val`](Self::get_val) reports the active
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedOption {
    title: Title,
    value: i32,
    previous: i32,
    range: Option<(i32, i32)>,
    multiplier: i32,
    zeroable: bool,
    most_recent: bool,
    alternates: Vec<i32, MAX_ALTERNATES>,
    alternate_index: usize,
    alternate_active: bool,
    alternate_policy: AlternatePolicy,
}

impl BoundedOption {
    /// Create an unranged option at zero with a multiplier of one
    pub fn new(title: &str) -> Self {
        Self {
            title: make_title(title),
            value: 0,
            previous: 0,
            range: None,
            multiplier: 1,
            zeroable: false,
            most_recent: false,
            alternates: Vec::new(),
            alternate_index: 0,
            alternate_active: false,
            alternate_policy: AlternatePolicy::default(),
        }
    }

    /// Display title
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Move the option by `delta` dial steps
    ///
    /// Never fails: out-of-range results saturate at the range ends.
    pub fn increment(&mut self, delta: i32) {
        self.previous = self.get_val();

        if self.alternate_active {
            self.step_alternate(delta);
            return;
        }

        let value = self
            .value
            .saturating_add(delta.saturating_mul(self.multiplier));
        self.value = self.clamp(value);
    }

    /// Restrict the value to `min..=max`
    ///
    /// The current value is clamped into the new range.
    pub fn set_range(&mut self, min: i32, max: i32) -> Result<(), OptionError> {
        if min > max {
            return Err(OptionError::InvalidRange);
        }
        self.range = Some((min, max));
        self.value = self.clamp(self.value);
        Ok(())
    }

    /// Remove the range restriction
    pub fn clear_range(&mut self) {
        self.range = None;
    }

    /// One end of the range, `None` when unranged
    pub fn get_range(&self, limit: Limit) -> Option<i32> {
        self.range.map(|(min, max)| match limit {
            Limit::Min => min,
            Limit::Max => max,
        })
    }

    /// Set the value change per dial step
    pub fn set_multiplier(&mut self, multiplier: i32) -> Result<(), OptionError> {
        if multiplier == 0 {
            return Err(OptionError::ZeroMultiplier);
        }
        self.multiplier = multiplier;
        Ok(())
    }

    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    /// Switch alternate mode on or off
    ///
    /// Enabling starts from the first alternate and fails if none are set.
    pub fn has_alternate(&mut self, enabled: bool) -> Result<(), OptionError> {
        if enabled && self.alternates.is_empty() {
            return Err(OptionError::AlternateSetEmpty);
        }
        if enabled && !self.alternate_active {
            self.alternate_index = 0;
        }
        self.alternate_active = enabled;
        Ok(())
    }

    /// Append a value to the alternate set
    pub fn set_alternate(&mut self, value: i32) -> Result<(), OptionError> {
        self.alternates
            .push(value)
            .map_err(|_| OptionError::AlternateSetFull)
    }

    pub fn set_alternate_policy(&mut self, policy: AlternatePolicy) {
        self.alternate_policy = policy;
    }

    pub fn alternate_policy(&self) -> AlternatePolicy {
        self.alternate_policy
    }

    pub fn alternates(&self) -> &[i32] {
        &self.alternates
    }

    /// Check if the dial is walking the alternate set
    pub fn is_alternate_active(&self) -> bool {
        self.alternate_active
    }

    /// Value held before the most recent change
    pub fn get_previous(&self) -> i32 {
        self.previous
    }

    /// Current value, or the active alternate in alternate mode
    pub fn get_val(&self) -> i32 {
        if self.alternate_active {
            if let Some(&value) = self.alternates.get(self.alternate_index) {
                return value;
            }
        }
        self.value
    }

    /// Overwrite the value directly
    ///
    /// Bypasses multiplier and range and leaves alternate mode.
    pub fn set_val(&mut self, value: i32) {
        self.previous = self.get_val();
        self.value = value;
        self.alternate_active = false;
    }

    /// Button press on this option
    pub fn select(&mut self) -> SelectOutcome {
        if !self.zeroable {
            return SelectOutcome::Confirm;
        }

        let previous = self.get_val();
        self.previous = previous;
        self.value = 0;
        self.alternate_active = false;

        SelectOutcome::Zeroed { previous }
    }

    /// Apply an encoder event
    ///
    /// Returns the select outcome for button presses and `None` for rotation.
    pub fn handle(&mut self, event: EncoderEvent) -> Option<SelectOutcome> {
        match event {
            EncoderEvent::Rotate(direction) => {
                self.increment(direction.delta() as i32);
                None
            }
            EncoderEvent::Select => Some(self.select()),
        }
    }

    pub fn set_zeroable(&mut self, zeroable: bool) {
        self.zeroable = zeroable;
    }

    pub fn is_zeroable(&self) -> bool {
        self.zeroable
    }

    /// Flag this option as the one most recently changed on the panel
    pub fn set_most_recent(&mut self, most_recent: bool) {
        self.most_recent = most_recent;
    }

    pub fn is_most_recent(&self) -> bool {
        self.most_recent
    }

    fn clamp(&self, value: i32) -> i32 {
        match self.range {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }

    fn step_alternate(&mut self, delta: i32) {
        let len = self.alternates.len();
        if len == 0 {
            return;
        }

        self.alternate_index = match self.alternate_policy {
            AlternatePolicy::Clamp => {
                let index = (self.alternate_index as i64).saturating_add(delta as i64);
                index.clamp(0, len as i64 - 1) as usize
            }
            AlternatePolicy::Wrap => {
                (self.alternate_index as i64 + delta as i64).rem_euclid(len as i64) as usize
            }
        };
    }
}

impl fmt::Display for BoundedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.get_val())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Direction;
    use core::fmt::Write;
    use heapless::String;
    use proptest::prelude::*;

    fn ranged(min: i32, max: i32, value: i32) -> BoundedOption {
        let mut option = BoundedOption::new("Test");
        option.set_range(min, max).unwrap();
        option.set_val(value);
        option
    }

    #[test]
    fn test_defaults() {
        let option = BoundedOption::new("ISO");
        assert_eq!(option.title(), "ISO");
        assert_eq!(option.get_val(), 0);
        assert_eq!(option.get_previous(), 0);
        assert_eq!(option.multiplier(), 1);
        assert_eq!(option.get_range(Limit::Min), None);
        assert!(!option.is_zeroable());
        assert!(!option.is_most_recent());
        assert_eq!(option.alternate_policy(), AlternatePolicy::Clamp);
    }

    #[test]
    fn test_increment_sequence() {
        let mut option = ranged(0, 10, 5);
        let mut seen = [0; 4];
        for (slot, delta) in seen.iter_mut().zip([1, 1, 1, -1]) {
            option.increment(delta);
            *slot = option.get_val();
        }
        assert_eq!(seen, [6, 7, 8, 7]);
        assert_eq!(option.get_previous(), 8);
    }

    #[test]
    fn test_increment_saturates_at_max() {
        let mut option = ranged(0, 3, 3);
        option.increment(1);
        option.increment(1);
        assert_eq!(option.get_val(), 3);
    }

    #[test]
    fn test_increment_saturates_at_min() {
        let mut option = ranged(-2, 2, -2);
        option.increment(-1);
        assert_eq!(option.get_val(), -2);
    }

    #[test]
    fn test_multiplier_applies() {
        let mut option = ranged(0, 100, 10);
        option.set_multiplier(5).unwrap();
        option.increment(1);
        assert_eq!(option.get_val(), 15);
        option.increment(-3);
        assert_eq!(option.get_val(), 0);
    }

    #[test]
    fn test_unranged_saturates_at_i32() {
        let mut option = BoundedOption::new("Big");
        option.set_val(i32::MAX - 1);
        option.set_multiplier(10).unwrap();
        option.increment(1);
        assert_eq!(option.get_val(), i32::MAX);
    }

    #[test]
    fn test_invalid_range() {
        let mut option = BoundedOption::new("Test");
        assert_eq!(option.set_range(10, 0), Err(OptionError::InvalidRange));
        assert_eq!(option.get_range(Limit::Max), None);
    }

    #[test]
    fn test_set_range_clamps_value() {
        let mut option = BoundedOption::new("Test");
        option.set_val(50);
        option.set_range(0, 10).unwrap();
        assert_eq!(option.get_val(), 10);
        assert_eq!(option.get_range(Limit::Min), Some(0));
        assert_eq!(option.get_range(Limit::Max), Some(10));
    }

    #[test]
    fn test_clear_range() {
        let mut option = ranged(0, 1, 1);
        option.clear_range();
        option.increment(5);
        assert_eq!(option.get_val(), 6);
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let mut option = BoundedOption::new("Test");
        assert_eq!(option.set_multiplier(0), Err(OptionError::ZeroMultiplier));
        assert_eq!(option.multiplier(), 1);
    }

    #[test]
    fn test_set_val_bypasses_range() {
        let mut option = ranged(0, 10, 5);
        option.set_val(42);
        assert_eq!(option.get_val(), 42);
        assert_eq!(option.get_previous(), 5);
    }

    #[test]
    fn test_select_zeroes() {
        let mut option = ranged(0, 10, 7);
        option.set_zeroable(true);
        assert_eq!(option.select(), SelectOutcome::Zeroed { previous: 7 });
        assert_eq!(option.get_val(), 0);
        assert_eq!(option.get_previous(), 7);
    }

    #[test]
    fn test_select_confirms() {
        let mut option = ranged(0, 10, 7);
        assert_eq!(option.select(), SelectOutcome::Confirm);
        assert_eq!(option.get_val(), 7);
    }

    #[test]
    fn test_alternate_requires_values() {
        let mut option = BoundedOption::new("Test");
        assert_eq!(option.has_alternate(true), Err(OptionError::AlternateSetEmpty));
        assert!(!option.is_alternate_active());
        // Disabling an empty set is fine
        assert_eq!(option.has_alternate(false), Ok(()));
    }

    #[test]
    fn test_alternate_set_full() {
        let mut option = BoundedOption::new("Test");
        for value in 0..MAX_ALTERNATES as i32 {
            option.set_alternate(value).unwrap();
        }
        assert_eq!(option.set_alternate(99), Err(OptionError::AlternateSetFull));
        assert_eq!(option.alternates(), &[0, 1, 2]);
    }

    #[test]
    fn test_alternate_clamp() {
        let mut option = BoundedOption::new("Test");
        option.set_val(5);
        option.set_alternate(-1).unwrap();
        option.set_alternate(-2).unwrap();
        option.has_alternate(true).unwrap();

        assert_eq!(option.get_val(), -1);
        option.increment(1);
        assert_eq!(option.get_val(), -2);
        assert_eq!(option.get_previous(), -1);
        option.increment(1);
        assert_eq!(option.get_val(), -2);
        option.increment(-5);
        assert_eq!(option.get_val(), -1);

        option.has_alternate(false).unwrap();
        assert_eq!(option.get_val(), 5);
    }

    #[test]
    fn test_alternate_wrap() {
        let mut option = BoundedOption::new("Test");
        for value in [10, 20, 30] {
            option.set_alternate(value).unwrap();
        }
        option.set_alternate_policy(AlternatePolicy::Wrap);
        option.has_alternate(true).unwrap();

        option.increment(-1);
        assert_eq!(option.get_val(), 30);
        option.increment(2);
        assert_eq!(option.get_val(), 20);
    }

    #[test]
    fn test_alternate_ignores_multiplier() {
        let mut option = BoundedOption::new("Test");
        option.set_multiplier(10).unwrap();
        option.set_alternate(1).unwrap();
        option.set_alternate(2).unwrap();
        option.has_alternate(true).unwrap();
        option.increment(1);
        assert_eq!(option.get_val(), 2);
    }

    #[test]
    fn test_set_val_leaves_alternate_mode() {
        let mut option = BoundedOption::new("Test");
        option.set_alternate(-1).unwrap();
        option.has_alternate(true).unwrap();
        option.set_val(3);
        assert!(!option.is_alternate_active());
        assert_eq!(option.get_val(), 3);
        assert_eq!(option.get_previous(), -1);
    }

    #[test]
    fn test_select_zeroes_alternate() {
        let mut option = BoundedOption::new("Test");
        option.set_zeroable(true);
        option.set_alternate(-1).unwrap();
        option.has_alternate(true).unwrap();
        assert_eq!(option.select(), SelectOutcome::Zeroed { previous: -1 });
        assert!(!option.is_alternate_active());
        assert_eq!(option.get_val(), 0);
    }

    #[test]
    fn test_handle_events() {
        let mut option = ranged(0, 10, 5);
        assert_eq!(option.handle(EncoderEvent::Rotate(Direction::Clockwise)), None);
        assert_eq!(option.get_val(), 6);
        assert_eq!(
            option.handle(EncoderEvent::Rotate(Direction::CounterClockwise)),
            None
        );
        assert_eq!(option.get_val(), 5);
        assert_eq!(
            option.handle(EncoderEvent::Select),
            Some(SelectOutcome::Confirm)
        );
    }

    #[test]
    fn test_most_recent_flag() {
        let mut option = BoundedOption::new("Test");
        option.set_most_recent(true);
        assert!(option.is_most_recent());
        // Presentation hint only, the value is untouched
        assert_eq!(option.get_val(), 0);
    }

    #[test]
    fn test_display() {
        let mut option = BoundedOption::new("ISO");
        option.set_val(400);
        let mut text: String<32> = String::new();
        write!(text, "{}", option).unwrap();
        assert_eq!(text.as_str(), "ISO: 400");
    }

    proptest! {
        #[test]
        fn prop_increment_stays_in_range(
            bounds in (-1000i32..1000, 0i32..1000),
            multiplier in 1i32..50,
            deltas in proptest::collection::vec(-20i32..20, 1..50),
        ) {
            let (min, span) = bounds;
            let max = min + span;
            let mut option = BoundedOption::new("Prop");
            option.set_range(min, max).unwrap();
            option.set_multiplier(multiplier).unwrap();

            for delta in deltas {
                option.increment(delta);
                prop_assert!(option.get_val() >= min && option.get_val() <= max);
            }
        }

        #[test]
        fn prop_get_val_idempotent(value in any::<i32>(), delta in -100i32..100) {
            let mut option = BoundedOption::new("Prop");
            option.set_val(value);
            option.increment(delta);
            prop_assert_eq!(option.get_val(), option.get_val());
        }
    }
}
