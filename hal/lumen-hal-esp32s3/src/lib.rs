//! ESP32-S3 implementation of the Lumen HAL traits
//!
//! Thin adapters from esp-hal peripherals to the `lumen-hal` traits, plus
//! the LCD_CAM DPI panel driver behind `lumen-core`'s `RgbPanel` seam.
//! Everything here is only compilable for the Xtensa target; host builds
//! exclude this crate.

#![no_std]

extern crate alloc;

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod panel;

pub use delay::SysDelay;
pub use gpio::{FlexGpio, OutGpio};
pub use i2c::I2cMaster;
pub use panel::{DpiPanel, DpiPins, PanelError};
