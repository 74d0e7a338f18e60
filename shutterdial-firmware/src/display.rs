//! Display backend that writes each drawn row to the defmt log

use defmt::*;
use heapless::String;

use shutterdial_core::traits::{DisplayDriver, DisplayError, COLS, ROWS};

/// Text-only screen mirrored to the log
///
/// Keeps the current contents of every row so a redraw logs the full frame
/// once it is complete.
pub struct LogDisplay {
    rows: [String<{ COLS as usize }>; ROWS as usize],
    highlighted: Option<u8>,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            rows: Default::default(),
            highlighted: None,
        }
    }

    /// Log every non-empty row
    pub fn flush(&self) {
        for (row, text) in self.rows.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            let marker = if self.highlighted == Some(row as u8) { "#" } else { "|" };
            info!("{}{}", marker, text.as_str());
        }
    }
}

impl DisplayDriver for LogDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.rows.iter_mut().for_each(|row| row.clear());
        self.highlighted = None;
        Ok(())
    }

    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::OutOfBounds);
        }

        let line = &mut self.rows[row as usize];
        line.clear();
        for _ in 0..col {
            line.push(' ').map_err(|_| DisplayError::OutOfBounds)?;
        }
        for c in text.chars() {
            if line.push(c).is_err() {
                trace!("Row {} truncated", row);
                break;
            }
        }
        Ok(())
    }

    fn invert(&mut self, row: u8, _start_col: u8, _end_col: u8) -> Result<(), DisplayError> {
        if row >= ROWS {
            return Err(DisplayError::OutOfBounds);
        }
        self.highlighted = Some(row);
        Ok(())
    }
}
