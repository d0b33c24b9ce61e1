//! Signal-to-GPIO assignment
//!
//! Fixed per board revision. The firmware crate must wire its peripherals
//! to match; the table exists so the complete mapping lives in one
//! reviewable place and can be checked for conflicts.

/// GPIO numbers for every signal the bring-up sequence touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    /// Horizontal sync
    pub hsync: u8,
    /// Vertical sync
    pub vsync: u8,
    /// Data enable
    pub de: u8,
    /// Pixel clock
    pub pclk: u8,
    /// Display on/off, if wired (this revision leaves it unconnected)
    pub disp: Option<u8>,
    /// 16-bit RGB565 data bus, D0 (B3) through D15 (R7)
    pub data: [u8; 16],
    /// Backlight enable
    pub backlight: u8,
    /// I2C SDA (touch controller and CH422G expander)
    pub i2c_sda: u8,
    /// I2C SCL
    pub i2c_scl: u8,
    /// GT911 reset, active low
    pub touch_rst: u8,
    /// GT911 interrupt / address-select
    pub touch_int: u8,
}

impl PinAssignment {
    /// True when any GPIO number is claimed by more than one signal
    pub fn has_conflicts(&self) -> bool {
        let mut all = [0u8; 25];
        all[..16].copy_from_slice(&self.data);
        all[16..].copy_from_slice(&[
            self.hsync,
            self.vsync,
            self.de,
            self.pclk,
            self.backlight,
            self.i2c_sda,
            self.i2c_scl,
            self.touch_rst,
            self.touch_int,
        ]);
        for (i, a) in all.iter().enumerate() {
            if all[i + 1..].contains(a) || Some(*a) == self.disp {
                return true;
            }
        }
        false
    }
}

/// Waveshare ESP32-S3 Touch LCD (RGB, rev B) wiring
pub const WAVESHARE_RGB_43: PinAssignment = PinAssignment {
    hsync: 46,
    vsync: 3,
    de: 5,
    pclk: 7,
    disp: None,
    data: [14, 38, 18, 17, 10, 39, 0, 45, 48, 47, 21, 1, 2, 42, 41, 40],
    backlight: 6,
    i2c_sda: 8,
    i2c_scl: 9,
    touch_rst: 13,
    touch_int: 4,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveshare_assignment_is_conflict_free() {
        assert!(!WAVESHARE_RGB_43.has_conflicts());
    }

    #[test]
    fn test_conflict_detection_catches_duplicates() {
        let mut pins = WAVESHARE_RGB_43;
        pins.backlight = pins.hsync;
        assert!(pins.has_conflicts());

        let mut pins = WAVESHARE_RGB_43;
        pins.touch_int = pins.touch_rst;
        assert!(pins.has_conflicts());

        let mut pins = WAVESHARE_RGB_43;
        pins.data[5] = pins.data[11];
        assert!(pins.has_conflicts());
    }
}
