//! shutterdial - Camera Control Panel Firmware
//!
//! Main firmware binary for RP2040-based camera-control panels. A rotary
//! encoder with push-button walks a small menu of camera settings; the
//! panel layout and encoder wiring come from the embedded `panel.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use shutterdial_core::config::{parse_config, PanelConfig};
use shutterdial_core::encoder::QuadratureDecoder;
use shutterdial_core::menu::Panel;
use shutterdial_hal_rp2040::{PinBank, RpEdgeInput};

use crate::display::LogDisplay;

mod channels;
mod display;
mod tasks;

/// Embedded panel configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

/// Decoder over the three RP2040 encoder lines
pub type Decoder =
    QuadratureDecoder<RpEdgeInput<'static>, RpEdgeInput<'static>, RpEdgeInput<'static>>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("shutterdial firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (config, panel) = load_config();
    info!(
        "Configuration loaded: {} options, encoder on A={} B={} S={}",
        config.options.len(),
        config.encoder.pin_a,
        config.encoder.pin_b,
        config.encoder.pin_select
    );

    // Take the encoder lines by number from the config
    let mut pins = PinBank::new(p);
    let a = RpEdgeInput::new(unwrap!(pins.take(config.encoder.pin_a)));
    let b = RpEdgeInput::new(unwrap!(pins.take(config.encoder.pin_b)));
    let select = RpEdgeInput::new(unwrap!(pins.take(config.encoder.pin_select)));
    let decoder = unwrap!(Decoder::new(a, b, select, config.encoder));

    spawner.spawn(tasks::encoder_task(decoder)).unwrap();
    spawner.spawn(tasks::ui_task(panel, LogDisplay::new())).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded config and build the panel from it
///
/// Any rejected setting falls back to the built-in defaults so the panel
/// always comes up.
fn load_config() -> (PanelConfig, Panel) {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse panel.toml: {:?}, using defaults", e);
            PanelConfig::default()
        }
    };

    match config.build_panel() {
        Ok(panel) => (config, panel),
        Err(e) => {
            error!("Invalid panel configuration: {:?}, using defaults", e);
            let config = PanelConfig::default();
            let panel = unwrap!(config.build_panel());
            (config, panel)
        }
    }
}
