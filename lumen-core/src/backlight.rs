//! Backlight control
//!
//! Two hardware paths exist across board revisions: a directly wired GPIO
//! (this revision) and the CH422G I/O expander found on the larger
//! panels. Both are safe to call repeatedly and before panel init; the
//! sequencer relies on that to guarantee the glass never shows the
//! uninitialized frame buffer.

use lumen_hal::{FlexPin, I2cBus, I2cError, Level};

use crate::bus::{BusManager, DeviceHandle};
use crate::error::AttachError;

/// Backlight on a directly wired GPIO
///
/// The pin polarity is configurable: some revisions drive the LED string
/// through a PNP stage and turn on with a low level.
#[derive(Debug)]
pub struct GpioBacklight<P> {
    pin: P,
    on_level: Level,
    on: bool,
}

impl<P: FlexPin> GpioBacklight<P> {
    /// Wrap `pin`; the pin is not touched until the first on/off call
    pub fn new(pin: P, on_level: Level) -> Self {
        Self {
            pin,
            on_level,
            on: false,
        }
    }

    /// Drive the backlight on.
    ///
    /// Reconfigures the pin as an output on every call, so it also
    /// recovers a pin left in a different mode by earlier boot stages.
    pub fn turn_on(&mut self) {
        self.pin.set_as_output();
        self.pin.set_level(self.on_level);
        self.on = true;
    }

    /// Drive the backlight off
    pub fn turn_off(&mut self) {
        self.pin.set_as_output();
        self.pin.set_level(self.on_level.inverted());
        self.on = false;
    }

    /// Last commanded logical state
    pub fn is_on(&self) -> bool {
        self.on
    }
}

// CH422G fixed addresses: one for the mode register, one for the output
// latch. The part has no register pointer; the address selects the
// register.
const CH422G_MODE_ADDR: u8 = 0x24;
const CH422G_OUT_ADDR: u8 = 0x38;

/// Mode byte enabling push-pull output on the IO pins
const CH422G_MODE_OUTPUT: u8 = 0x01;

/// SCL speed the expander is rated for
pub const EXPANDER_SCL_HZ: u32 = 400_000;

const EXPANDER_IO_TIMEOUT_MS: u32 = 50;

/// Backlight behind a CH422G I/O expander pin
pub struct Ch422gBacklight {
    mode_dev: DeviceHandle,
    out_dev: DeviceHandle,
    /// Output latch shadow; the part is write-only
    shadow: u8,
    bit: u8,
    on: bool,
}

impl Ch422gBacklight {
    /// Attach the expander and claim `bit` (0-7) of its output latch
    pub fn attach<B: I2cBus>(bus: &mut BusManager<B>, bit: u8) -> Result<Self, AttachError> {
        let mode_dev = bus.add_device(CH422G_MODE_ADDR, EXPANDER_SCL_HZ)?;
        let out_dev = match bus.add_device(CH422G_OUT_ADDR, EXPANDER_SCL_HZ) {
            Ok(dev) => dev,
            Err(e) => {
                bus.remove_device(mode_dev);
                return Err(e);
            }
        };
        Ok(Self {
            mode_dev,
            out_dev,
            shadow: 0,
            bit: bit & 0x07,
            on: false,
        })
    }

    /// Drive the backlight on
    pub fn turn_on<B: I2cBus>(&mut self, bus: &mut BusManager<B>) -> Result<(), I2cError> {
        self.shadow |= 1 << self.bit;
        self.commit(bus)?;
        self.on = true;
        Ok(())
    }

    /// Drive the backlight off
    pub fn turn_off<B: I2cBus>(&mut self, bus: &mut BusManager<B>) -> Result<(), I2cError> {
        self.shadow &= !(1 << self.bit);
        self.commit(bus)?;
        self.on = false;
        Ok(())
    }

    /// Last commanded logical state
    pub fn is_on(&self) -> bool {
        self.on
    }

    fn commit<B: I2cBus>(&mut self, bus: &mut BusManager<B>) -> Result<(), I2cError> {
        // Mode is volatile across expander resets, rewrite it every time
        bus.transmit(
            &self.mode_dev,
            &[CH422G_MODE_OUTPUT],
            EXPANDER_IO_TIMEOUT_MS,
        )?;
        bus.transmit(&self.out_dev, &[self.shadow], EXPANDER_IO_TIMEOUT_MS)
    }
}
