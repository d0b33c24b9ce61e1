//! GPIO pin abstractions
//!
//! The bring-up sequence drives the touch reset, address-select and
//! backlight lines directly. Writes are immediate - no debouncing, no
//! queueing. Implementations handle the chip-specific register work.

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The opposite level.
    pub fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that switches between output and input mode at runtime.
///
/// The GT911 interrupt line needs this: it is an output while the
/// controller is held in reset (its level selects the I2C address) and
/// becomes an interrupt line once the controller boots.
///
/// Entering output mode must leave pull resistors and pin interrupts
/// disabled; the reset sequence depends on the driven level alone.
pub trait FlexPin: OutputPin + InputPin {
    /// Switch the pin to output mode
    fn set_as_output(&mut self);

    /// Switch the pin to input mode (released to the external device)
    fn set_as_input(&mut self);
}
