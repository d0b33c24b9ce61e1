//! GPIO adapters
//!
//! Wraps esp-hal's `Output` and `Flex` pins behind the `lumen-hal` pin
//! traits. The flex adapter drives the GT911 interrupt line: output while
//! the address-select sequence runs, input afterwards.

use esp_hal::gpio::{Flex, InputConfig, Output, OutputConfig, Pull};
use lumen_hal::{FlexPin, InputPin, Level, OutputPin};

/// Push-pull output pin
pub struct OutGpio(Output<'static>);

impl OutGpio {
    pub fn new(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for OutGpio {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Runtime-direction pin
///
/// Output mode is push-pull with no pull resistor; input mode is floating.
/// The GT911 address-select sequence needs exactly that: the driven level
/// must win, and afterwards the controller drives the line.
pub struct FlexGpio(Flex<'static>);

impl FlexGpio {
    pub fn new(pin: Flex<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for FlexGpio {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.0.set_high(),
            Level::Low => self.0.set_low(),
        }
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

impl InputPin for FlexGpio {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl FlexPin for FlexGpio {
    fn set_as_output(&mut self) {
        self.0.apply_output_config(&OutputConfig::default());
        self.0.set_input_enable(false);
        self.0.set_output_enable(true);
    }

    fn set_as_input(&mut self) {
        self.0.set_output_enable(false);
        self.0
            .apply_input_config(&InputConfig::default().with_pull(Pull::None));
        self.0.set_input_enable(true);
    }
}
