//! Hardware seams the bring-up sequence drives
//!
//! The GPIO, I2C and delay traits live in `lumen-hal`; device-level seams
//! that need the configuration types live here.

mod panel;

pub use panel::{RgbPanel, VsyncCallback};
