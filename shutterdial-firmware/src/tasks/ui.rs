//! UI task
//!
//! Owns the panel, applies encoder events to it and redraws the screen
//! whenever something changed.

use defmt::*;

use shutterdial_core::menu::{Interface, Panel, PanelEffect};

use crate::channels::ENCODER_EVENTS;
use crate::display::LogDisplay;

#[embassy_executor::task]
pub async fn ui_task(mut panel: Panel, mut display: LogDisplay) {
    info!("UI task started");
    redraw(&panel, &mut display);

    loop {
        let event = ENCODER_EVENTS.receive().await;

        match panel.handle(event) {
            PanelEffect::None => continue,
            PanelEffect::ValueChanged { id, value, previous } => {
                debug!("{:?}: {} -> {}", id, previous, value);
            }
            PanelEffect::Zeroed { id, previous } => {
                info!("{:?} reset to 0 (was {})", id, previous);
            }
            PanelEffect::Confirmed { id, value } => {
                info!("{:?} set to {}", id, value);
            }
            PanelEffect::Activated { id, value } => {
                if let Some(item) = panel.get(id) {
                    info!("{} activated ({})", item.title(), value);
                }
            }
            effect => trace!("{:?}", effect),
        }

        redraw(&panel, &mut display);
    }
}

fn redraw(panel: &Panel, display: &mut LogDisplay) {
    match panel.render(display) {
        Ok(()) => display.flush(),
        Err(e) => warn!("Render failed: {:?}", e),
    }
}
