//! Panel timing descriptors
//!
//! Two fixed profiles matching the two panel variants this board revision
//! ships with. Sync pulse widths and porches come from the panel
//! datasheets and are not tunables; a profile is selected at build time
//! and read back verbatim by the panel driver.

/// Immutable RGB timing descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTiming {
    /// Pixel clock frequency in Hz
    pub pclk_hz: u32,
    /// Horizontal resolution (active pixels per line)
    pub h_res: u16,
    /// Vertical resolution (active lines per frame)
    pub v_res: u16,
    /// Horizontal sync pulse width in pixel clocks
    pub hsync_pulse_width: u16,
    /// Blanking after hsync, before the active region
    pub hsync_back_porch: u16,
    /// Blanking after the active region, before the next hsync
    pub hsync_front_porch: u16,
    /// Vertical sync pulse width in lines
    pub vsync_pulse_width: u16,
    /// Blanking lines after vsync
    pub vsync_back_porch: u16,
    /// Blanking lines before the next vsync
    pub vsync_front_porch: u16,
    /// Latch data on the falling pixel-clock edge
    pub pclk_active_neg: bool,
}

impl PanelTiming {
    /// Total pixel clocks per line, including blanking
    pub const fn h_total(&self) -> u32 {
        self.h_res as u32
            + self.hsync_pulse_width as u32
            + self.hsync_back_porch as u32
            + self.hsync_front_porch as u32
    }

    /// Total lines per frame, including blanking
    pub const fn v_total(&self) -> u32 {
        self.v_res as u32
            + self.vsync_pulse_width as u32
            + self.vsync_back_porch as u32
            + self.vsync_front_porch as u32
    }

    /// Approximate refresh rate in Hz (integer truncation)
    pub const fn refresh_hz(&self) -> u32 {
        self.pclk_hz / (self.h_total() * self.v_total())
    }
}

/// Resolution profile, selected at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionProfile {
    /// 800x480 panel (4.3" variant)
    #[default]
    Wvga800x480,
    /// 1024x600 panel (7" variant)
    Wsvga1024x600,
}

impl ResolutionProfile {
    /// The timing descriptor for this profile
    pub const fn timing(self) -> PanelTiming {
        match self {
            ResolutionProfile::Wvga800x480 => PanelTiming {
                pclk_hz: 16_000_000,
                h_res: 800,
                v_res: 480,
                hsync_pulse_width: 4,
                hsync_back_porch: 8,
                hsync_front_porch: 8,
                vsync_pulse_width: 4,
                vsync_back_porch: 8,
                vsync_front_porch: 8,
                pclk_active_neg: true,
            },
            ResolutionProfile::Wsvga1024x600 => PanelTiming {
                pclk_hz: 21_000_000,
                h_res: 1024,
                v_res: 600,
                hsync_pulse_width: 30,
                hsync_back_porch: 145,
                hsync_front_porch: 170,
                vsync_pulse_width: 2,
                vsync_back_porch: 23,
                vsync_front_porch: 12,
                pclk_active_neg: true,
            },
        }
    }

    /// Active resolution as (width, height)
    pub const fn resolution(self) -> (u16, u16) {
        let t = self.timing();
        (t.h_res, t.v_res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wvga_profile_literals() {
        let t = ResolutionProfile::Wvga800x480.timing();
        assert_eq!(t.pclk_hz, 16_000_000);
        assert_eq!((t.h_res, t.v_res), (800, 480));
        assert_eq!(t.hsync_pulse_width, 4);
        assert_eq!(t.hsync_back_porch, 8);
        assert_eq!(t.hsync_front_porch, 8);
        assert_eq!(t.vsync_pulse_width, 4);
        assert_eq!(t.vsync_back_porch, 8);
        assert_eq!(t.vsync_front_porch, 8);
        assert!(t.pclk_active_neg);
    }

    #[test]
    fn test_wsvga_profile_literals() {
        let t = ResolutionProfile::Wsvga1024x600.timing();
        assert_eq!(t.pclk_hz, 21_000_000);
        assert_eq!((t.h_res, t.v_res), (1024, 600));
        assert_eq!(t.hsync_pulse_width, 30);
        assert_eq!(t.hsync_back_porch, 145);
        assert_eq!(t.hsync_front_porch, 170);
        assert_eq!(t.vsync_pulse_width, 2);
        assert_eq!(t.vsync_back_porch, 23);
        assert_eq!(t.vsync_front_porch, 12);
        assert!(t.pclk_active_neg);
    }

    #[test]
    fn test_totals_include_blanking() {
        let t = ResolutionProfile::Wvga800x480.timing();
        assert_eq!(t.h_total(), 800 + 4 + 8 + 8);
        assert_eq!(t.v_total(), 480 + 4 + 8 + 8);

        let t = ResolutionProfile::Wsvga1024x600.timing();
        assert_eq!(t.h_total(), 1024 + 30 + 145 + 170);
        assert_eq!(t.v_total(), 600 + 2 + 23 + 12);
    }

    #[test]
    fn test_refresh_rates_are_plausible() {
        // Both panels should land somewhere in the 20-50 Hz band the
        // PSRAM-backed frame buffers can sustain.
        for profile in [
            ResolutionProfile::Wvga800x480,
            ResolutionProfile::Wsvga1024x600,
        ] {
            let hz = profile.timing().refresh_hz();
            assert!((20..=50).contains(&hz), "{:?}: {} Hz", profile, hz);
        }
    }
}
