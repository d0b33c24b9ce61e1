//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the bring-up sequence is written
//! against. The ESP32-S3 HAL implements them for real hardware; the test
//! suites in `lumen-core` implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (lumen-firmware)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-core (bring-up sequence)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ lumen-hal-    │       │ host mocks    │
//! │   esp32s3     │       │ (tests)       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C master transactions
//! - [`delay::DelayMs`] - Blocking settle delays

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::DelayMs;
pub use gpio::{FlexPin, InputPin, Level, OutputPin};
pub use i2c::{I2cBus, I2cConfig, I2cError};
