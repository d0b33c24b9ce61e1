//! Board-agnostic bring-up logic for the Lumen RGB LCD firmware
//!
//! This crate contains the whole power-on sequence for the board, written
//! against the `lumen-hal` traits so it runs on the host under test:
//!
//! - Shared I2C bus manager (lazy creation, device attach bookkeeping)
//! - GT911 touch address resolver and point reader
//! - Backlight control (direct GPIO and CH422G expander)
//! - The panel bring-up sequencer
//! - The vsync-to-renderer frame signal
//!
//! The sequence is one-shot: handles created here live for the process
//! lifetime and there is no teardown path.

#![no_std]
#![deny(unsafe_code)]

// Host tests need std for proptest
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod backlight;
pub mod bringup;
pub mod bus;
pub mod config;
pub mod error;
pub mod touch;
pub mod traits;
pub mod vsync;
