//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod encoder;
pub mod ui;

pub use encoder::encoder_task;
pub use ui::ui_task;
