//! I2C bus abstractions
//!
//! Provides the master-side transaction trait the shared bus manager is
//! built on. All transactions use 7-bit addressing and carry an explicit
//! timeout so probing an absent device fails instead of hanging the
//! bring-up thread.

/// Errors surfaced by raw bus transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// No acknowledgment within the transaction window
    Timeout,
    /// Device did not acknowledge its address or a data byte
    Nack,
    /// Controller-level fault (configuration rejected, arbitration loss,
    /// bus stuck)
    Bus,
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    /// * `timeout_ms` - Acknowledgment window in milliseconds
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), I2cError>;

    /// Read data from a device at the given address
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), I2cError>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    fn write_read(
        &mut self,
        address: u8,
        data: &[u8],
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), I2cError>;
}

/// Per-device clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz) - used for the GT911, which misbehaves at
    /// higher clock rates on long flex cables
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz) - used for the CH422G expander
    pub const FAST: Self = Self { frequency: 400_000 };
}
