//! Display driver trait for the panel screen
//!
//! The screen is treated as a character grid. The panel never draws pixels,
//! it only places text and highlights rows.

/// Number of text rows on the screen
pub const ROWS: u8 = 8;

/// Number of characters per row
pub const COLS: u8 = 21;

/// Errors that can occur when drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Row or column outside the grid
    OutOfBounds,
    /// Transfer to the display controller failed
    Bus,
}

/// Trait for a line-oriented text display
pub trait DisplayDriver {
    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position
    ///
    /// - `row`: Row number (0-7)
    /// - `col`: Column number (0-20)
    /// - `text`: ASCII text to display (max 21 chars)
    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region (for selection highlight)
    ///
    /// - `row`: Row to invert (0-7)
    /// - `start_col`: Starting column (0-20)
    /// - `end_col`: Ending column (0-20), inclusive
    fn invert(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;
}

/// Helper trait for drawing common UI elements
pub trait DisplayExt: DisplayDriver {
    /// Draw a menu entry, highlighted when `selected`
    fn draw_menu_item(&mut self, row: u8, text: &str, selected: bool) -> Result<(), DisplayError> {
        let mut buf = [b' '; COLS as usize];
        if selected {
            buf[0] = b'>';
        }
        let text = ascii_prefix(text, COLS as usize - 2);
        buf[2..2 + text.len()].copy_from_slice(text.as_bytes());

        let line = core::str::from_utf8(&buf).unwrap_or("");
        self.text(row, 0, line)?;
        if selected {
            self.invert(row, 0, COLS - 1)?;
        }

        Ok(())
    }

    /// Draw a label-value pair
    ///
    /// The label is left aligned and the value right aligned:
    /// `"Label:          Value"`.
    fn draw_field(&mut self, row: u8, label: &str, value: &str) -> Result<(), DisplayError> {
        let mut buf = [b' '; COLS as usize];

        let label = ascii_prefix(label, 10);
        buf[..label.len()].copy_from_slice(label.as_bytes());
        buf[label.len()] = b':';

        let value = ascii_prefix(value, 9);
        let value_start = COLS as usize - value.len();
        buf[value_start..].copy_from_slice(value.as_bytes());

        let line = core::str::from_utf8(&buf).unwrap_or("");
        self.text(row, 0, line)
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}

/// Longest prefix of `text` that fits `max` bytes without splitting a char
fn ascii_prefix(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
