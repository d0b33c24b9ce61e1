//! Build-time board configuration
//!
//! Everything in this module is fixed at compile time - there is no
//! runtime configuration parsing. A board revision is described by one
//! [`BoardConfig`] value constructed in the firmware crate.

mod pins;
mod timing;

pub use pins::{PinAssignment, WAVESHARE_RGB_43};
pub use timing::{PanelTiming, ResolutionProfile};

use lumen_hal::Level;

/// RGB data bus width in bits
pub const RGB_DATA_WIDTH: u8 = 16;

/// Bits per pixel (RGB565)
pub const RGB_BITS_PER_PIXEL: u8 = 16;

/// Frame-buffer allocation policy
///
/// Frame buffers live in external (PSRAM) memory. The bounce buffer is a
/// small staging buffer in internal memory that smooths DMA timing from
/// PSRAM to the timing generator; zero disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePolicy {
    /// Number of full frame buffers (1..=3)
    pub frame_buffers: u8,
    /// Bounce buffer size in pixels; 0 disables bounce buffering
    pub bounce_buffer_px: usize,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self {
            frame_buffers: 2,
            bounce_buffer_px: 0,
        }
    }
}

/// Complete build-time configuration for one board revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Which of the two supported panels is fitted
    pub profile: ResolutionProfile,
    /// Frame-buffer allocation policy
    pub frames: FramePolicy,
    /// Logic level that turns the backlight on (board-specific polarity,
    /// not auto-detected)
    pub backlight_on_level: Level,
    /// Signal-to-GPIO mapping
    pub pins: PinAssignment,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            profile: ResolutionProfile::default(),
            frames: FramePolicy::default(),
            backlight_on_level: Level::High,
            pins: WAVESHARE_RGB_43,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_wvga_double_buffered() {
        let config = BoardConfig::default();
        assert_eq!(config.profile, ResolutionProfile::Wvga800x480);
        assert_eq!(config.frames.frame_buffers, 2);
        assert_eq!(config.frames.bounce_buffer_px, 0);
        assert_eq!(config.backlight_on_level, Level::High);
    }

    #[test]
    fn test_default_pin_assignment_has_no_conflicts() {
        assert!(!BoardConfig::default().pins.has_conflicts());
    }
}
