//! Board drivers, hardware initialisation, and peripheral helpers.

pub mod button;
pub mod hw_init;
#[cfg(target_os = "espidf")]
pub mod lcd;
pub mod status_led;
pub mod watchdog;
