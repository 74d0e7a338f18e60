//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use shutterdial_core::encoder::EncoderEvent;

/// Channel capacity for decoded encoder events
const ENCODER_CHANNEL_SIZE: usize = 8;

/// Decoded rotation and button events, encoder task to UI task
pub static ENCODER_EVENTS: Channel<CriticalSectionRawMutex, EncoderEvent, ENCODER_CHANNEL_SIZE> =
    Channel::new();
