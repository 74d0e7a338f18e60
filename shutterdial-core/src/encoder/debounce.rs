//! Time-window debouncing for edge interrupts
//!
//! An edge is accepted only when more than the debounce interval has passed
//! since the last accepted edge on the same line. Timestamps are wrapping
//! `u32` milliseconds, so the window stays correct across counter rollover.

/// Debounce state for one physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDebouncer {
    interval_ms: u32,
    last_accepted_ms: Option<u32>,
}

impl EdgeDebouncer {
    /// Create a debouncer with the given window
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Check whether an edge at `now_ms` falls outside the bounce window
    ///
    /// The first edge on a line is always settled.
    pub fn is_settled(&self, now_ms: u32) -> bool {
        match self.last_accepted_ms {
            Some(last) => now_ms.wrapping_sub(last) > self.interval_ms,
            None => true,
        }
    }

    /// Record `now_ms` as the time of the last accepted edge
    pub fn accept(&mut self, now_ms: u32) {
        self.last_accepted_ms = Some(now_ms);
    }

    /// Debounce window in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time of the last accepted edge
    pub fn last_accepted_ms(&self) -> Option<u32> {
        self.last_accepted_ms
    }
}
