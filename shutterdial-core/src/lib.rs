//! Board-agnostic core logic for the camera-control panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Debounced quadrature decoding of the rotary encoder and its button
//! - The bounded/alternating option value model
//! - Menu composition (menus, options, actions, camera and ready items)
//! - Configuration type definitions and the embedded config parser
//! - The display trait the panel renders through

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod encoder;
pub mod menu;
pub mod option;
pub mod traits;
