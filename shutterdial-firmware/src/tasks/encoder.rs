//! Encoder task
//!
//! Waits for an edge on any encoder line, feeds it to the decoder with the
//! current time and forwards decoded events to the UI.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Instant;

use shutterdial_core::encoder::{Channel, Line};

use crate::channels::ENCODER_EVENTS;
use crate::Decoder;

#[embassy_executor::task]
pub async fn encoder_task(mut decoder: Decoder) {
    decoder.init();
    info!("Encoder task started, {} ms debounce", decoder.config().debounce_ms);

    loop {
        let line = {
            let (a, b, select) = decoder.lines_mut();
            match select3(a.wait_for_edge(), b.wait_for_edge(), select.wait_for_edge()).await {
                Either3::First(()) => Line::Channel(Channel::A),
                Either3::Second(()) => Line::Channel(Channel::B),
                Either3::Third(()) => Line::Select,
            }
        };

        // Millisecond clock wraps after ~49 days, the debouncer handles it
        let now_ms = Instant::now().as_millis() as u32;
        decoder.on_edge(line, now_ms);

        while let Some(event) = decoder.take_event() {
            if ENCODER_EVENTS.try_send(event).is_err() {
                warn!("UI busy, dropping {:?}", event);
            }
        }
    }
}
