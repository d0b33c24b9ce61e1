//! LCD_CAM DPI panel driver
//!
//! Drives the RGB panel through the LCD_CAM peripheral's DPI mode: the
//! timing generator clocks a PSRAM-resident frame buffer out over the
//! 16-bit parallel bus via GDMA. The driver implements `lumen-core`'s
//! `RgbPanel` seam, so the bring-up sequencer stays target-agnostic.
//!
//! Frames are sent one-shot rather than circular: each `flush` transfers
//! the full buffer and blocks until the transfer completes, which is also
//! the point where the vsync callback fires. The rendering loop therefore
//! paces itself to the panel without extra interrupt plumbing.
//!
//! `FramePolicy::frame_buffers` selects how many PSRAM frame buffers are
//! allocated; after each flush the just-sent buffer rotates to the back of
//! the ring and the renderer draws into the oldest one.

use alloc::boxed::Box;
use alloc::vec::Vec;

use esp_hal::dma::{DmaDescriptor, DmaTxBuf, CHUNK_SIZE};
use esp_hal::gpio::{AnyPin, Level};
use esp_hal::lcd_cam::{
    lcd::{
        dpi::{Config as DpiConfig, Dpi, Format, FrameTiming},
        ClockMode, Phase, Polarity,
    },
    LcdCam,
};
use esp_hal::peripherals::{DMA_CH2, LCD_CAM};
use esp_hal::time::Rate;
use esp_hal::Blocking;

use lumen_core::config::{FramePolicy, PanelTiming};
use lumen_core::traits::{RgbPanel, VsyncCallback};

// Descriptor table sized for the largest supported panel (1024x600,
// 16 bpp). Must live in internal RAM; the frame buffer itself is PSRAM.
const MAX_FRAME_BYTES: usize = 1024 * 600 * 2;
const NUM_DMA_DESC: usize = MAX_FRAME_BYTES.div_ceil(CHUNK_SIZE);

#[link_section = ".dma"]
static mut TX_DESCRIPTORS: [DmaDescriptor; NUM_DMA_DESC] = [DmaDescriptor::EMPTY; NUM_DMA_DESC];

/// Panel driver failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    /// Frame-buffer count outside the supported 1..=3 range
    InvalidFramePolicy,
    /// The peripheral rejected the DPI configuration
    ConfigRejected,
    /// The DMA buffer could not be linked to its descriptors
    DmaSetup,
    /// Operation requires `configure` to have run first
    NotConfigured,
    /// A frame transfer failed
    Transfer,
}

/// Output pins for the DPI interface, pre-degraded so the panel driver
/// does not care which physical GPIOs the board wired
pub struct DpiPins {
    pub vsync: AnyPin<'static>,
    pub hsync: AnyPin<'static>,
    pub de: AnyPin<'static>,
    pub pclk: AnyPin<'static>,
    /// D0 (B3) through D15 (R7)
    pub data: [AnyPin<'static>; 16],
}

/// Hardware held between construction and `configure`
struct PendingHw {
    lcd_cam: LCD_CAM<'static>,
    channel: DMA_CH2<'static>,
    pins: DpiPins,
}

/// Running DPI interface plus its frame buffers.
///
/// `send` consumes the interface and the linked buffer and `wait` hands
/// them back, hence the options. `spares` holds the rest of the buffer
/// ring, oldest first.
struct ActiveHw {
    dpi: Option<Dpi<'static, Blocking>>,
    buf: Option<DmaTxBuf>,
    spares: Vec<&'static mut [u8]>,
}

/// RGB panel on the LCD_CAM peripheral
pub struct DpiPanel {
    pending: Option<PendingHw>,
    active: Option<ActiveHw>,
    callback: Option<VsyncCallback>,
    frame_bytes: usize,
}

impl DpiPanel {
    /// Wrap the raw peripherals. Nothing is configured until the bring-up
    /// sequencer calls [`RgbPanel::configure`].
    pub fn new(lcd_cam: LCD_CAM<'static>, channel: DMA_CH2<'static>, pins: DpiPins) -> Self {
        Self {
            pending: Some(PendingHw {
                lcd_cam,
                channel,
                pins,
            }),
            active: None,
            callback: None,
            frame_bytes: 0,
        }
    }

    /// Raw RGB565 little-endian frame buffer, for the renderer to draw
    /// into before [`flush`](DpiPanel::flush)
    pub fn frame(&mut self) -> Option<&mut [u8]> {
        let active = self.active.as_mut()?;
        let buf = active.buf.as_mut()?;
        Some(&mut buf.as_mut_slice()[..self.frame_bytes])
    }

    /// Transfer the frame buffer to the glass and block until the panel
    /// has consumed it. Fires the vsync callback on completion.
    pub fn flush(&mut self) -> Result<(), PanelError> {
        let active = self.active.as_mut().ok_or(PanelError::NotConfigured)?;
        let (dpi, buf) = match (active.dpi.take(), active.buf.take()) {
            (Some(dpi), Some(buf)) => (dpi, buf),
            _ => return Err(PanelError::NotConfigured),
        };

        match dpi.send(false, buf) {
            Ok(xfer) => {
                let (result, dpi, buf) = xfer.wait();
                active.dpi = Some(dpi);
                active.buf = Some(Self::rotate(buf, &mut active.spares)?);
                result.map_err(|e| {
                    log::error!("panel: frame transfer failed: {:?}", e);
                    PanelError::Transfer
                })?;
            }
            Err((e, dpi, buf)) => {
                log::error!("panel: frame transfer rejected: {:?}", e);
                active.dpi = Some(dpi);
                active.buf = Some(buf);
                return Err(PanelError::Transfer);
            }
        }

        if let Some(callback) = self.callback {
            // Bare-metal main loop: the context-switch request has no
            // scheduler to act on it.
            let _ = callback();
        }
        Ok(())
    }

    /// Relink the descriptors to the oldest spare buffer and push the
    /// just-sent one to the back of the ring. No-op with a single buffer.
    fn rotate(buf: DmaTxBuf, spares: &mut Vec<&'static mut [u8]>) -> Result<DmaTxBuf, PanelError> {
        if spares.is_empty() {
            return Ok(buf);
        }
        let (descriptors, sent) = buf.split();
        spares.push(sent);
        let next = spares.remove(0);
        DmaTxBuf::new(descriptors, next).map_err(|e| {
            log::error!("panel: frame buffer rotation failed: {:?}", e);
            PanelError::DmaSetup
        })
    }

    fn build_config(timing: &PanelTiming) -> DpiConfig {
        // pclk_active_neg: data is latched on the falling edge, so shift
        // out while the clock is low.
        let phase = if timing.pclk_active_neg {
            Phase::ShiftLow
        } else {
            Phase::ShiftHigh
        };

        DpiConfig::default()
            .with_clock_mode(ClockMode {
                polarity: Polarity::IdleLow,
                phase,
            })
            .with_frequency(Rate::from_hz(timing.pclk_hz))
            .with_format(Format {
                enable_2byte_mode: true,
                ..Default::default()
            })
            .with_timing(FrameTiming {
                horizontal_active_width: timing.h_res as usize,
                horizontal_total_width: timing.h_total() as usize,
                horizontal_blank_front_porch: timing.hsync_front_porch as usize,
                vertical_active_height: timing.v_res as usize,
                vertical_total_height: timing.v_total() as usize,
                vertical_blank_front_porch: timing.vsync_front_porch as usize,
                hsync_width: timing.hsync_pulse_width as usize,
                vsync_width: timing.vsync_pulse_width as usize,
                hsync_position: 0,
            })
            .with_vsync_idle_level(Level::High)
            .with_hsync_idle_level(Level::High)
            .with_de_idle_level(Level::Low)
            .with_disable_black_region(false)
    }
}

impl RgbPanel for DpiPanel {
    type Error = PanelError;

    fn configure(&mut self, timing: &PanelTiming, frames: &FramePolicy) -> Result<(), Self::Error> {
        if frames.frame_buffers == 0 || frames.frame_buffers > 3 {
            return Err(PanelError::InvalidFramePolicy);
        }
        let hw = self.pending.take().ok_or(PanelError::NotConfigured)?;

        let config = Self::build_config(timing);
        let lcd_cam = LcdCam::new(hw.lcd_cam);
        let pins = hw.pins;
        let [d0, d1, d2, d3, d4, d5, d6, d7, d8, d9, d10, d11, d12, d13, d14, d15] = pins.data;

        let dpi = Dpi::new(lcd_cam.lcd, hw.channel, config)
            .map_err(|e| {
                log::error!("panel: DPI configuration rejected: {:?}", e);
                PanelError::ConfigRejected
            })?
            .with_vsync(pins.vsync)
            .with_hsync(pins.hsync)
            .with_de(pins.de)
            .with_pclk(pins.pclk)
            .with_data0(d0)
            .with_data1(d1)
            .with_data2(d2)
            .with_data3(d3)
            .with_data4(d4)
            .with_data5(d5)
            .with_data6(d6)
            .with_data7(d7)
            .with_data8(d8)
            .with_data9(d9)
            .with_data10(d10)
            .with_data11(d11)
            .with_data12(d12)
            .with_data13(d13)
            .with_data14(d14)
            .with_data15(d15);

        // The DMA engine streams a whole PSRAM buffer per transfer; bounce
        // buffering is the renderer's concern on this path.
        if frames.bounce_buffer_px > 0 {
            log::debug!(
                "panel: bounce buffer request ({} px) ignored, descriptor chain streams directly",
                frames.bounce_buffer_px
            );
        }
        self.frame_bytes = timing.h_res as usize * timing.v_res as usize * 2;
        let mut ring: Vec<&'static mut [u8]> = (0..frames.frame_buffers)
            .map(|_| Box::leak(alloc::vec![0u8; self.frame_bytes].into_boxed_slice()))
            .collect();
        // frame_buffers >= 1 was checked above
        let front = ring.pop().ok_or(PanelError::InvalidFramePolicy)?;

        // Descriptor table access; single panel instance per boot, so the
        // static is never aliased.
        #[allow(static_mut_refs)]
        let descriptors = unsafe { &mut TX_DESCRIPTORS };
        let buf = DmaTxBuf::new(descriptors, front).map_err(|e| {
            log::error!("panel: DMA buffer setup failed: {:?}", e);
            PanelError::DmaSetup
        })?;

        log::debug!(
            "panel: configured {}x{} DPI, {} frame buffer(s) of {} bytes",
            timing.h_res,
            timing.v_res,
            frames.frame_buffers,
            self.frame_bytes
        );
        self.active = Some(ActiveHw {
            dpi: Some(dpi),
            buf: Some(buf),
            spares: ring,
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), Self::Error> {
        // First transfer starts the timing generator with a cleared frame
        self.flush()
    }

    fn on_vsync(&mut self, callback: VsyncCallback) -> Result<(), Self::Error> {
        if self.active.is_none() {
            return Err(PanelError::NotConfigured);
        }
        self.callback = Some(callback);
        Ok(())
    }
}
