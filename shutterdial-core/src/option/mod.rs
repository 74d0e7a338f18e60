//! Option value model
//!
//! A [`BoundedOption`] is a single adjustable setting on the panel: a number
//! that the dial moves in steps, optionally held inside a range, optionally
//! reset to zero by the button, or switched to a short list of alternate
//! values.

pub mod bounded;
pub mod error;

pub use bounded::{AlternatePolicy, BoundedOption, Limit, SelectOutcome, MAX_ALTERNATES};
pub use error::OptionError;

use heapless::String;

/// Maximum title length in bytes
pub const TITLE_LEN: usize = 16;

/// Display title of a panel item
pub type Title = String<TITLE_LEN>;

/// Build a title from `text`, truncated to [`TITLE_LEN`] on a char boundary
pub fn make_title(text: &str) -> Title {
    let mut title = Title::new();
    for c in text.chars() {
        if title.push(c).is_err() {
            break;
        }
    }
    title
}
