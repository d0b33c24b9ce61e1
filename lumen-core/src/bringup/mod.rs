//! Panel bring-up sequencer
//!
//! One-shot orchestration of the power-on sequence. The step order is
//! load-bearing on real hardware and must not be rearranged:
//!
//! 1. Build the timing descriptor for the fitted panel
//! 2. Configure the panel (frame buffers allocated here)
//! 3. Start the timing generator
//! 4. Resolve and attach the touch controller (with-touch builds only;
//!    a missing controller is logged and tolerated)
//! 5. Turn the backlight on
//! 6. Settle delay, letting electrical transients die out
//! 7. Hand panel and touch off to the rendering integration
//! 8. Register the vsync callback
//!
//! The backlight stays off until the timing generator feeds the glass
//! valid data, so the uninitialized frame buffer is never visible. Any
//! failure outside step 4 is fatal and leaves the board half-initialized;
//! the caller is expected to reset rather than retry.

use lumen_hal::{DelayMs, FlexPin, I2cBus, I2cError, OutputPin};

use crate::backlight::GpioBacklight;
use crate::bus::BusManager;
use crate::config::{BoardConfig, FramePolicy, PanelTiming};
use crate::error::Error;
use crate::touch::{self, Gt911};
use crate::traits::{RgbPanel, VsyncCallback};

/// Post-backlight settle time before the rendering handoff
pub const SETTLE_MS: u32 = 100;

/// The two GPIO lines the touch address resolver drives
pub struct TouchPins<RST, INT> {
    /// GT911 reset, active low
    pub rst: RST,
    /// GT911 interrupt / address-select line
    pub int: INT,
}

/// Everything a fully brought-up board owns.
///
/// Constructed once by [`run_with_touch`]; the handles live for the
/// process lifetime.
#[derive(Debug)]
pub struct Board<P, B, BL> {
    pub panel: P,
    pub bus: BusManager<B>,
    pub backlight: GpioBacklight<BL>,
    /// `None` when no GT911 answered on either candidate address
    pub touch: Option<Gt911>,
}

/// Bring-up result for builds without touch support
pub struct DisplayBoard<P, BL> {
    pub panel: P,
    pub backlight: GpioBacklight<BL>,
}

/// Run the full bring-up sequence including touch resolution.
///
/// `bus_init` creates the I2C controller on first use; `handoff` is the
/// rendering-library integration point, called after the backlight is on
/// and the panel has settled. A missing touch controller downgrades the
/// board rather than failing it; every other error aborts.
#[allow(clippy::too_many_arguments)]
pub fn run_with_touch<P, B, RST, INT, BL, D, F, H>(
    config: &BoardConfig,
    mut panel: P,
    bus_init: F,
    mut touch_pins: TouchPins<RST, INT>,
    backlight_pin: BL,
    delay: &mut D,
    vsync_cb: VsyncCallback,
    handoff: H,
) -> Result<Board<P, B, BL>, Error>
where
    P: RgbPanel,
    B: I2cBus,
    RST: OutputPin,
    INT: FlexPin,
    BL: FlexPin,
    D: DelayMs,
    F: FnOnce() -> Result<B, I2cError>,
    H: FnOnce(&mut P, Option<&mut Gt911>),
{
    let timing = config.profile.timing();
    start_panel(&mut panel, &timing, &config.frames)?;

    let mut bus = BusManager::new();
    bus.ensure_bus(bus_init).map_err(Error::BusInit)?;

    let mut touch = match touch::resolve(&mut bus, &mut touch_pins.rst, &mut touch_pins.int, delay)
    {
        Ok(addr) => {
            let (width, height) = config.profile.resolution();
            let gt911 = Gt911::attach(&mut bus, addr, width - 1, height - 1)
                .map_err(Error::DeviceAttach)?;
            match gt911.product_id(&mut bus) {
                Ok(id) => log::info!(
                    "touch: product id {}",
                    core::str::from_utf8(&id).unwrap_or("<non-ascii>")
                ),
                Err(e) => log::warn!("touch: product id read failed: {:?}", e),
            }
            Some(gt911)
        }
        Err(e) => {
            log::warn!("bringup: {}, continuing without touch", e);
            None
        }
    };

    let mut backlight = GpioBacklight::new(backlight_pin, config.backlight_on_level);
    finish(&mut panel, &mut backlight, delay, vsync_cb, |panel| {
        handoff(panel, touch.as_mut())
    })?;

    log::info!("bringup: complete, touch {}", if touch.is_some() { "enabled" } else { "disabled" });
    Ok(Board {
        panel,
        bus,
        backlight,
        touch,
    })
}

/// Bring-up variant for builds without touch support.
///
/// Skips bus creation and touch resolution entirely; the remaining steps
/// run in the same order as [`run_with_touch`].
pub fn run_display_only<P, BL, D, H>(
    config: &BoardConfig,
    mut panel: P,
    backlight_pin: BL,
    delay: &mut D,
    vsync_cb: VsyncCallback,
    handoff: H,
) -> Result<DisplayBoard<P, BL>, Error>
where
    P: RgbPanel,
    BL: FlexPin,
    D: DelayMs,
    H: FnOnce(&mut P),
{
    let timing = config.profile.timing();
    start_panel(&mut panel, &timing, &config.frames)?;

    let mut backlight = GpioBacklight::new(backlight_pin, config.backlight_on_level);
    finish(&mut panel, &mut backlight, delay, vsync_cb, handoff)?;

    log::info!("bringup: complete, display only");
    Ok(DisplayBoard { panel, backlight })
}

/// Steps 1-3: timing descriptor in, running timing generator out
fn start_panel<P: RgbPanel>(
    panel: &mut P,
    timing: &PanelTiming,
    frames: &FramePolicy,
) -> Result<(), Error> {
    log::info!(
        "bringup: panel {}x{}, pclk {} Hz, ~{} Hz refresh",
        timing.h_res,
        timing.v_res,
        timing.pclk_hz,
        timing.refresh_hz()
    );

    panel.configure(timing, frames).map_err(|e| {
        log::error!("bringup: panel configuration rejected: {:?}", e);
        Error::PanelConfig
    })?;
    panel.init().map_err(|e| {
        log::error!("bringup: timing generator failed to start: {:?}", e);
        Error::PanelInit
    })
}

/// Steps 5-8: backlight, settle, handoff, vsync registration
fn finish<P, BL, D, H>(
    panel: &mut P,
    backlight: &mut GpioBacklight<BL>,
    delay: &mut D,
    vsync_cb: VsyncCallback,
    handoff: H,
) -> Result<(), Error>
where
    P: RgbPanel,
    BL: FlexPin,
    D: DelayMs,
    H: FnOnce(&mut P),
{
    backlight.turn_on();
    delay.delay_ms(SETTLE_MS);

    handoff(panel);

    panel.on_vsync(vsync_cb).map_err(|e| {
        log::error!("bringup: vsync callback registration failed: {:?}", e);
        Error::CallbackRegistration
    })
}
