//! Blocking delay adapter

use esp_hal::delay::Delay;
use lumen_hal::DelayMs;

/// Busy-wait delay backed by the system timer
pub struct SysDelay(Delay);

impl SysDelay {
    pub fn new() -> Self {
        Self(Delay::new())
    }
}

impl Default for SysDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayMs for SysDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_millis(ms);
    }
}
