//! Rotary encoder decoding
//!
//! Turns raw, bounce-prone edges on the two quadrature channels and the
//! push-button line into clean rotation and select events.
//!
//! ```text
//! edge ──▶ debounce (per line) ──▶ Gray-code table ──▶ count + event queue
//! ```

pub mod debounce;
pub mod decoder;
pub mod events;
pub mod gray;

pub use debounce::EdgeDebouncer;
pub use decoder::{Channel, Line, QuadratureDecoder, EVENT_QUEUE_LEN};
pub use events::{Direction, EncoderEvent};
pub use gray::{Levels, Transition};
