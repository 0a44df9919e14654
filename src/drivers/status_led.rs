//! Red status LED driver.
//!
//! Mirrors the broadcast toggle so the operator can see at a glance
//! whether the radio is meant to be active.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LED GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct StatusLed {
    on: bool,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self { on: false }
    }

    /// Write the pin only when the level actually changes.
    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(pins::LED_GPIO, on);
            self.on = on;
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
