//! Debounced quadrature decoder
//!
//! [`QuadratureDecoder`] owns the three encoder lines and the per-line
//! debounce state. The platform layer calls [`on_channel_edge`] and
//! [`on_select_edge`] whenever a line interrupt fires, passing the current
//! time; the decoder filters contact bounce, resolves direction through the
//! Gray-code table and queues the resulting [`EncoderEvent`]s.
//!
//! Noise is never an error: bounced edges and impossible transitions are
//! dropped (logged at trace level with the `defmt` feature) and leave the
//! decoder state untouched.
//!
//! [`on_channel_edge`]: QuadratureDecoder::on_channel_edge
//! [`on_select_edge`]: QuadratureDecoder::on_select_edge

use heapless::Deque;

use shutterdial_hal::{EdgeInput, EdgeTrigger, Pull};

use super::debounce::EdgeDebouncer;
use super::events::{Direction, EncoderEvent};
use super::gray::{self, Levels, Transition};
use crate::config::{ConfigError, EncoderConfig};

/// Capacity of the pending event queue
pub const EVENT_QUEUE_LEN: usize = 16;

/// Quadrature channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

/// Any of the three encoder lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Quadrature channel A or B
    Channel(Channel),
    /// Push-button
    Select,
}

/// Debounced decoder for a rotary encoder with push-button
pub struct QuadratureDecoder<A, B, S> {
    a: A,
    b: B,
    select: S,
    config: EncoderConfig,
    a_debounce: EdgeDebouncer,
    b_debounce: EdgeDebouncer,
    select_debounce: EdgeDebouncer,
    /// Last accepted (A, B) pair
    levels: Levels,
    /// Accumulated rotation steps
    count: i32,
    /// Count at the last `take_delta` call
    reported: i32,
    events: Deque<EncoderEvent, EVENT_QUEUE_LEN>,
    initialized: bool,
}

impl<A, B, S> QuadratureDecoder<A, B, S>
where
    A: EdgeInput,
    B: EdgeInput,
    S: EdgeInput,
{
    /// Create a decoder over the given lines
    ///
    /// Returns [`ConfigError::DuplicateLine`] if two lines share a pin.
    /// The lines are not touched until [`init`](Self::init).
    pub fn new(a: A, b: B, select: S, config: EncoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            a,
            b,
            select,
            a_debounce: EdgeDebouncer::new(config.debounce_ms),
            b_debounce: EdgeDebouncer::new(config.debounce_ms),
            select_debounce: EdgeDebouncer::new(config.debounce_ms),
            config,
            levels: Levels::IDLE,
            count: 0,
            reported: 0,
            events: Deque::new(),
            initialized: false,
        })
    }

    /// Configure the lines and arm their edge triggers
    ///
    /// Channels A and B are pulled up and fire on any edge; the select line
    /// is pulled up and fires on the falling edge only. The starting level
    /// pair is sampled once the pull-ups are applied. Repeated calls are
    /// no-ops.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }

        self.a.configure(Pull::Up, EdgeTrigger::Any);
        self.b.configure(Pull::Up, EdgeTrigger::Any);
        self.select.configure(Pull::Up, EdgeTrigger::Falling);
        self.levels = self.sample();
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Encoder armed: A={} B={} S={} debounce={}ms",
            self.config.pin_a,
            self.config.pin_b,
            self.config.pin_select,
            self.config.debounce_ms
        );
    }

    /// Dispatch an edge on any line
    pub fn on_edge(&mut self, line: Line, now_ms: u32) -> Option<EncoderEvent> {
        match line {
            Line::Channel(channel) => self.on_channel_edge(channel, now_ms),
            Line::Select => self.on_select_edge(now_ms),
        }
    }

    /// Handle an edge on channel A or B
    ///
    /// Returns the rotation event if the edge produced a valid step.
    pub fn on_channel_edge(&mut self, channel: Channel, now_ms: u32) -> Option<EncoderEvent> {
        if !self.debouncer(channel).is_settled(now_ms) {
            #[cfg(feature = "defmt")]
            defmt::trace!("Bounce on channel {} at {}ms", channel, now_ms);
            return None;
        }

        let current = self.sample();
        let direction = match gray::decode(self.levels, current) {
            Transition::Step(direction) => direction,
            Transition::Unchanged => return None,
            Transition::Glitch => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Glitch {} -> {}", self.levels, current);
                return None;
            }
        };

        let event = self.increment(direction);
        self.debouncer_mut(channel).accept(now_ms);
        // Level pair last: a reader never sees new levels with a stale count
        self.levels = current;

        Some(event)
    }

    /// Handle a falling edge on the select line
    ///
    /// The line must still read low once the edge is accepted, otherwise the
    /// edge was contact noise.
    pub fn on_select_edge(&mut self, now_ms: u32) -> Option<EncoderEvent> {
        if !self.select_debounce.is_settled(now_ms) {
            #[cfg(feature = "defmt")]
            defmt::trace!("Bounce on select at {}ms", now_ms);
            return None;
        }

        if self.select.is_high() {
            return None;
        }

        self.select_debounce.accept(now_ms);
        self.push_event(EncoderEvent::Select);

        Some(EncoderEvent::Select)
    }

    /// Accumulated rotation count
    pub fn get(&self) -> i32 {
        self.count
    }

    /// Rotation accumulated since the previous call
    pub fn take_delta(&mut self) -> i32 {
        let delta = self.count.wrapping_sub(self.reported);
        self.reported = self.count;
        delta
    }

    /// Pop the oldest pending event
    pub fn take_event(&mut self) -> Option<EncoderEvent> {
        self.events.pop_front()
    }

    /// Number of events waiting in the queue
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Last accepted level pair
    pub fn levels(&self) -> Levels {
        self.levels
    }

    /// Line and debounce configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Check if [`init`](Self::init) has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Mutable access to the owned lines, for awaiting their interrupts
    pub fn lines_mut(&mut self) -> (&mut A, &mut B, &mut S) {
        (&mut self.a, &mut self.b, &mut self.select)
    }

    fn increment(&mut self, direction: Direction) -> EncoderEvent {
        self.count = self.count.wrapping_add(direction.delta() as i32);
        let event = EncoderEvent::Rotate(direction);
        self.push_event(event);
        event
    }

    fn push_event(&mut self, event: EncoderEvent) {
        if self.events.is_full() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Encoder event queue full, dropping oldest");
            self.events.pop_front();
        }
        // Cannot fail: a slot was freed above if the queue was full
        let _ = self.events.push_back(event);
    }

    fn sample(&self) -> Levels {
        Levels::new(self.a.is_high(), self.b.is_high())
    }

    fn debouncer(&self, channel: Channel) -> &EdgeDebouncer {
        match channel {
            Channel::A => &self.a_debounce,
            Channel::B => &self.b_debounce,
        }
    }

    fn debouncer_mut(&mut self, channel: Channel) -> &mut EdgeDebouncer {
        match channel {
            Channel::A => &mut self.a_debounce,
            Channel::B => &mut self.b_debounce,
        }
    }
}
