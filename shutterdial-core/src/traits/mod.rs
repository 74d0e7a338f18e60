//! Hardware abstraction traits
//!
//! These traits define the interface between the panel logic and the
//! screen it draws on.

pub mod display;

pub use display::{DisplayDriver, DisplayError, DisplayExt, COLS, ROWS};
