//! ESP32-S3 firmware support library for the serra greenhouse console.
//!
//! The binary in `src/bin/main.rs` wires these drivers to the
//! hardware-independent state machine in `serra-core`.

#![no_std]

pub mod ds3231;
pub mod link;
pub mod surface;
pub mod xpt2046;
