//! Bring-up error taxonomy
//!
//! [`TouchNotFound`] is the only recoverable condition: the sequencer
//! downgrades it to a touch-less board. Everything else aborts the
//! sequence - a mid-sequence hardware failure leaves undefined electrical
//! state that is best handled by a full restart, so there are no retries
//! and no rollback.

use core::fmt;

use lumen_hal::I2cError;

/// Reasons a device cannot be attached to the shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The shared bus has not been created yet
    BusNotReady,
    /// Another device already claims this address
    AddressInUse,
    /// The device table is full
    TableFull,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::BusNotReady => write!(f, "I2C bus not initialized"),
            AttachError::AddressInUse => write!(f, "address already in use"),
            AttachError::TableFull => write!(f, "device table full"),
        }
    }
}

/// Fatal bring-up failures, tagged by the step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The I2C controller rejected its configuration
    BusInit(I2cError),
    /// A persistent device could not be attached to the bus
    DeviceAttach(AttachError),
    /// The panel driver rejected the timing or resource request
    PanelConfig,
    /// The panel timing generator failed to start
    PanelInit,
    /// Vsync callback registration was rejected
    CallbackRegistration,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BusInit(e) => write!(f, "I2C bus creation failed: {:?}", e),
            Error::DeviceAttach(e) => write!(f, "device attach failed: {}", e),
            Error::PanelConfig => write!(f, "panel configuration rejected"),
            Error::PanelInit => write!(f, "panel initialization failed"),
            Error::CallbackRegistration => write!(f, "vsync callback registration failed"),
        }
    }
}

/// Neither GT911 candidate address acknowledged the probe.
///
/// Non-fatal: display bring-up continues with touch disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchNotFound;

impl fmt::Display for TouchNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GT911 not found on either candidate address")
    }
}
