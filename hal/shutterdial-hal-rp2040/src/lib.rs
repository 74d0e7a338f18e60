//! RP2040-specific HAL for the camera-control panel firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `shutterdial-hal` traits:
//!
//! - Edge-triggered inputs backed by the GPIO interrupt controller
//! - Dynamic pin allocation for config-driven setup

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::RpEdgeInput;
pub use pins::{PinBank, PinError, GPIO_COUNT};
