//! I2C master adapter
//!
//! Wraps the blocking esp-hal I2C controller. The controller enforces its
//! own bus timeout configured at creation; the per-call `timeout_ms` from
//! the trait cannot be pushed down per transaction, so an absent device
//! surfaces as `Timeout` via the controller's acknowledgment check
//! instead of hanging.

use esp_hal::i2c::master::{Error as I2cHwError, I2c};
use esp_hal::Blocking;
use lumen_hal::{I2cBus, I2cError};

/// Blocking I2C master on the shared bus
pub struct I2cMaster(I2c<'static, Blocking>);

impl I2cMaster {
    pub fn new(i2c: I2c<'static, Blocking>) -> Self {
        Self(i2c)
    }
}

fn map_err(e: I2cHwError) -> I2cError {
    match e {
        I2cHwError::Timeout => I2cError::Timeout,
        I2cHwError::AcknowledgeCheckFailed(_) => I2cError::Nack,
        _ => I2cError::Bus,
    }
}

impl I2cBus for I2cMaster {
    fn write(&mut self, address: u8, data: &[u8], _timeout_ms: u32) -> Result<(), I2cError> {
        self.0.write(address, data).map_err(map_err)
    }

    fn read(&mut self, address: u8, buf: &mut [u8], _timeout_ms: u32) -> Result<(), I2cError> {
        self.0.read(address, buf).map_err(map_err)
    }

    fn write_read(
        &mut self,
        address: u8,
        data: &[u8],
        buf: &mut [u8],
        _timeout_ms: u32,
    ) -> Result<(), I2cError> {
        self.0.write_read(address, data, buf).map_err(map_err)
    }
}
