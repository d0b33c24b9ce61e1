//! Lumen firmware entry point
//!
//! Boot sequence: logger -> PSRAM heap -> peripheral wiring -> bring-up
//! sequencer -> render loop.
//!
//! The GPIO wiring below mirrors `lumen_core::config::WAVESHARE_RGB_43`;
//! the table is the reviewable source of truth, this file is where each
//! number meets its peripheral. The `touch` feature selects which
//! bring-up variant runs; without it the I2C bus is never created.

#![no_std]
#![no_main]

extern crate alloc;

mod demo;

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Flex, Pin};
use log::{error, info};

use lumen_core::bringup;
use lumen_core::config::BoardConfig;
use lumen_core::vsync::FrameSignal;
use lumen_hal_esp32s3::{DpiPanel, DpiPins, FlexGpio, SysDelay};

esp_bootloader_esp_idf::esp_app_desc!();

/// Heartbeat interval in frames, roughly every two seconds at the WVGA
/// refresh rate
const HEARTBEAT_FRAMES: u32 = 80;

static FRAME_SIGNAL: FrameSignal = FrameSignal::new();

/// Interrupt-side vsync handler handed to the panel
fn vsync_bridge() -> bool {
    FRAME_SIGNAL.notify()
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    info!("lumen: boot");

    let config = BoardConfig::default();
    debug_assert!(!config.pins.has_conflicts());

    let dpi_pins = DpiPins {
        hsync: peripherals.GPIO46.degrade(),
        vsync: peripherals.GPIO3.degrade(),
        de: peripherals.GPIO5.degrade(),
        pclk: peripherals.GPIO7.degrade(),
        data: [
            peripherals.GPIO14.degrade(),
            peripherals.GPIO38.degrade(),
            peripherals.GPIO18.degrade(),
            peripherals.GPIO17.degrade(),
            peripherals.GPIO10.degrade(),
            peripherals.GPIO39.degrade(),
            peripherals.GPIO0.degrade(),
            peripherals.GPIO45.degrade(),
            peripherals.GPIO48.degrade(),
            peripherals.GPIO47.degrade(),
            peripherals.GPIO21.degrade(),
            peripherals.GPIO1.degrade(),
            peripherals.GPIO2.degrade(),
            peripherals.GPIO42.degrade(),
            peripherals.GPIO41.degrade(),
            peripherals.GPIO40.degrade(),
        ],
    };
    let panel = DpiPanel::new(peripherals.LCD_CAM, peripherals.DMA_CH2, dpi_pins);
    let backlight_pin = FlexGpio::new(Flex::new(peripherals.GPIO6));
    let mut delay = SysDelay::new();

    #[cfg(feature = "touch")]
    {
        use esp_hal::gpio::{Level, Output, OutputConfig};
        use esp_hal::i2c::master::{Config as I2cHwConfig, I2c};
        use esp_hal::time::Rate;
        use lumen_core::bringup::TouchPins;
        use lumen_hal::{I2cConfig, I2cError};
        use lumen_hal_esp32s3::{I2cMaster, OutGpio};

        let touch_pins = TouchPins {
            rst: OutGpio::new(Output::new(
                peripherals.GPIO13,
                Level::High,
                OutputConfig::default(),
            )),
            int: FlexGpio::new(Flex::new(peripherals.GPIO4)),
        };
        let i2c0 = peripherals.I2C0;
        let sda = peripherals.GPIO8;
        let scl = peripherals.GPIO9;

        let board = bringup::run_with_touch(
            &config,
            panel,
            move || {
                // GT911 sets the shared bus clock; see I2cConfig::STANDARD
                let bus = I2c::new(
                    i2c0,
                    I2cHwConfig::default()
                        .with_frequency(Rate::from_hz(I2cConfig::STANDARD.frequency)),
                )
                .map_err(|e| {
                    error!("i2c: controller rejected configuration: {:?}", e);
                    I2cError::Bus
                })?;
                Ok(I2cMaster::new(bus.with_sda(sda).with_scl(scl)))
            },
            touch_pins,
            backlight_pin,
            &mut delay,
            vsync_bridge,
            |_, touch| {
                info!(
                    "render handoff, touch {}",
                    if touch.is_some() { "attached" } else { "absent" }
                );
            },
        );

        match board {
            Ok(board) => run_touch_demo(board, &config),
            Err(e) => {
                error!("lumen: bring-up failed: {}", e);
                panic!("bring-up failed: {}", e);
            }
        }
    }

    #[cfg(not(feature = "touch"))]
    {
        let board = bringup::run_display_only(
            &config,
            panel,
            backlight_pin,
            &mut delay,
            vsync_bridge,
            |_| info!("render handoff, display only"),
        );

        match board {
            Ok(board) => run_display_demo(board, &config),
            Err(e) => {
                error!("lumen: bring-up failed: {}", e);
                panic!("bring-up failed: {}", e);
            }
        }
    }
}

#[cfg(feature = "touch")]
fn run_touch_demo(
    board: bringup::Board<DpiPanel, lumen_hal_esp32s3::I2cMaster, FlexGpio>,
    config: &BoardConfig,
) -> ! {
    use log::warn;

    let bringup::Board {
        mut panel,
        mut bus,
        mut touch,
        ..
    } = board;
    let mut scene = demo::Scene::new(config.profile.resolution());
    let mut frame: u32 = 0;

    loop {
        if let Some(gt911) = touch.as_mut() {
            match gt911.read_points(&mut bus) {
                Ok(points) => scene.set_cursor(points.first().map(|p| (p.x, p.y))),
                Err(e) => warn!("touch: read failed: {:?}", e),
            }
        }
        render_frame(&mut panel, &mut scene, &mut frame);
    }
}

#[cfg(not(feature = "touch"))]
fn run_display_demo(board: bringup::DisplayBoard<DpiPanel, FlexGpio>, config: &BoardConfig) -> ! {
    let bringup::DisplayBoard { mut panel, .. } = board;
    let mut scene = demo::Scene::new(config.profile.resolution());
    let mut frame: u32 = 0;

    loop {
        render_frame(&mut panel, &mut scene, &mut frame);
    }
}

fn render_frame(panel: &mut DpiPanel, scene: &mut demo::Scene, frame: &mut u32) {
    FRAME_SIGNAL.arm();
    if let Some(buf) = panel.frame() {
        scene.draw(buf);
    }
    if let Err(e) = panel.flush() {
        error!("panel: flush failed: {:?}", e);
    }
    // flush blocks through the transfer, so the signal is already set
    let _ = FRAME_SIGNAL.take();

    *frame += 1;
    if *frame % HEARTBEAT_FRAMES == 0 {
        info!("lumen: alive, frame {}", frame);
    }
}
