//! Common surface of every panel item

use core::fmt::{self, Write};

use heapless::String;

use super::ItemId;
use crate::option::BoundedOption;
use crate::traits::{DisplayDriver, DisplayError, DisplayExt};

/// Capability shared by all panel items
///
/// `Display` gives the one-line textual form used in logs.
pub trait Interface: fmt::Display {
    /// Display title
    fn title(&self) -> &str;

    /// Current value
    fn get_val(&self) -> i32;

    /// Overwrite the current value
    fn set_val(&mut self, value: i32);

    /// Children in display order, empty for leaf items
    fn get_items(&self) -> &[ItemId] {
        &[]
    }

    /// Draw the item as a label-value field on `row`
    fn display<D: DisplayDriver>(&self, driver: &mut D, row: u8) -> Result<(), DisplayError> {
        let mut value: String<12> = String::new();
        // i32 is at most 11 chars, cannot overflow
        let _ = write!(value, "{}", self.get_val());
        driver.draw_field(row, self.title(), &value)
    }
}

impl Interface for BoundedOption {
    fn title(&self) -> &str {
        BoundedOption::title(self)
    }

    fn get_val(&self) -> i32 {
        BoundedOption::get_val(self)
    }

    fn set_val(&mut self, value: i32) {
        BoundedOption::set_val(self, value)
    }
}
