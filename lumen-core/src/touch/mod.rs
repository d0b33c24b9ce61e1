//! GT911 touch controller support
//!
//! The GT911 latches its I2C address from the level of its INT line while
//! reset is released, and the board does not strap that line, so the
//! address is not guaranteed by hardware alone. Resolution is therefore a
//! timed GPIO sequence followed by probing both candidate addresses.
//!
//! Resolution failure is non-fatal: the panel must still come up with
//! touch disabled.

mod gt911;

pub use gt911::{Gt911, TouchPoint, MAX_POINTS};

use lumen_hal::{DelayMs, FlexPin, I2cBus, Level, OutputPin};

use crate::bus::BusManager;
use crate::error::TouchNotFound;

/// Candidate addresses, in the order they are probed
pub const ADDR_PRIMARY: u8 = 0x5D;
pub const ADDR_SECONDARY: u8 = 0x14;

/// SCL speed for probing and for the persistent touch device
pub const TOUCH_SCL_HZ: u32 = 100_000;

/// Per-probe acknowledgment window
pub const PROBE_TIMEOUT_MS: u32 = 20;

// Datasheet lower bounds for the reset sequence
const RESET_HOLD_MS: u32 = 10;
const ADDR_SELECT_HOLD_MS: u32 = 2;
const BOOT_SETTLE_MS: u32 = 60;

/// Which candidate address the reset sequence drives the INT line for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddrSelect {
    /// INT high during reset release: controller latches 0x5D
    #[default]
    Primary,
    /// INT low: controller latches 0x14
    Secondary,
}

impl AddrSelect {
    /// The address this selection drives for
    pub fn address(self) -> u8 {
        match self {
            AddrSelect::Primary => ADDR_PRIMARY,
            AddrSelect::Secondary => ADDR_SECONDARY,
        }
    }

    fn int_level(self) -> Level {
        match self {
            AddrSelect::Primary => Level::High,
            AddrSelect::Secondary => Level::Low,
        }
    }
}

/// Run the GT911 reset sequence, driving the INT line so the controller
/// latches `select` as its address.
///
/// The holds are lower bounds from the datasheet: 10 ms in reset, 2 ms of
/// address setup before release, 60 ms of boot time after. The INT line
/// is handed back to input mode at the end - it becomes the interrupt
/// line once the controller is up.
pub fn reset_and_select<RST, INT, D>(rst: &mut RST, int: &mut INT, select: AddrSelect, delay: &mut D)
where
    RST: OutputPin,
    INT: FlexPin,
    D: DelayMs,
{
    log::info!(
        "touch: reset sequence, selecting address {:#04x}",
        select.address()
    );

    int.set_as_output();

    rst.set_low();
    delay.delay_ms(RESET_HOLD_MS);

    int.set_level(select.int_level());
    delay.delay_ms(ADDR_SELECT_HOLD_MS);

    rst.set_high();
    delay.delay_ms(BOOT_SETTLE_MS);

    int.set_as_input();
}

/// Determine which candidate address the controller answers on.
///
/// Drives the reset sequence for the primary candidate, then probes
/// `0x5D` followed by `0x14`: a transient device attach and a single
/// one-byte transmit per candidate. The first acknowledgment wins and the
/// second address is not probed. The probing order is fixed regardless of
/// which address the reset drove for.
pub fn resolve<B, RST, INT, D>(
    bus: &mut BusManager<B>,
    rst: &mut RST,
    int: &mut INT,
    delay: &mut D,
) -> Result<u8, TouchNotFound>
where
    B: I2cBus,
    RST: OutputPin,
    INT: FlexPin,
    D: DelayMs,
{
    reset_and_select(rst, int, AddrSelect::Primary, delay);

    for addr in [ADDR_PRIMARY, ADDR_SECONDARY] {
        let device = match bus.add_device(addr, TOUCH_SCL_HZ) {
            Ok(device) => device,
            Err(e) => {
                log::warn!("touch: cannot attach probe device at {:#04x}: {}", addr, e);
                continue;
            }
        };

        let probe = bus.transmit(&device, &[0x00], PROBE_TIMEOUT_MS);
        bus.remove_device(device);

        match probe {
            Ok(()) => {
                log::info!("touch: GT911 found at {:#04x}", addr);
                return Ok(addr);
            }
            Err(e) => log::info!("touch: no response at {:#04x}: {:?}", addr, e),
        }
    }

    log::error!("touch: GT911 not found on either candidate address");
    log::error!("touch: check I2C wiring, pull-ups, power and reset connections");
    Err(TouchNotFound)
}
