//! Debounced press-edge detection for the front-panel buttons.
//!
//! ## Hardware
//!
//! M5StickC Plus2 buttons A (GPIO37) and B (GPIO39) are active-low with
//! external pull-ups.  GPIO34–39 on the ESP32 are input-only and have no
//! internal pulls, so the pins are read as plain inputs.
//!
//! ## Edge detection
//!
//! The main loop polls each button at control-tick rate.  A press is
//! reported exactly once, after the level has been held for the debounce
//! window.  Holding the button produces no further events; it has to be
//! released before the next press counts.
//!
//! | State          | Input                       | Next           | Event    |
//! |----------------|-----------------------------|----------------|----------|
//! | `Released`     | pressed                     | `DebounceWait` |          |
//! | `DebounceWait` | released                    | `Released`     |          |
//! | `DebounceWait` | pressed, held >= debounce   | `Held`         | `Pressed`|
//! | `Held`         | released                    | `Released`     |          |

use embedded_hal::digital::InputPin;

/// Button events emitted after debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Released,
    DebounceWait { since_ms: u64 },
    Held,
}

pub struct ButtonDriver<P: InputPin> {
    pin: P,
    active_low: bool,
    debounce_ms: u64,
    state: DebounceState,
}

impl<P: InputPin> ButtonDriver<P> {
    /// Wrap an active-low input (the M5StickC wiring).
    pub fn active_low(pin: P, debounce_ms: u32) -> Self {
        Self::new(pin, true, debounce_ms)
    }

    pub fn new(pin: P, active_low: bool, debounce_ms: u32) -> Self {
        Self {
            pin,
            active_low,
            debounce_ms: u64::from(debounce_ms),
            state: DebounceState::Released,
        }
    }

    /// Call from the main loop at each control tick.
    /// `now_ms` is the current monotonic time in milliseconds.
    pub fn tick(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let pressed = self.is_pressed();

        match self.state {
            DebounceState::Released => {
                if pressed {
                    self.state = DebounceState::DebounceWait { since_ms: now_ms };
                    // A zero window reports on the first sample.
                    return self.confirm(now_ms, now_ms);
                }
                None
            }

            DebounceState::DebounceWait { since_ms } => {
                if !pressed {
                    self.state = DebounceState::Released;
                    return None;
                }
                self.confirm(since_ms, now_ms)
            }

            DebounceState::Held => {
                if !pressed {
                    self.state = DebounceState::Released;
                }
                None
            }
        }
    }

    fn confirm(&mut self, since_ms: u64, now_ms: u64) -> Option<ButtonEvent> {
        if now_ms.saturating_sub(since_ms) >= self.debounce_ms {
            self.state = DebounceState::Held;
            Some(ButtonEvent::Pressed)
        } else {
            None
        }
    }

    /// Read errors count as "not pressed".
    fn is_pressed(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        level.unwrap_or(false)
    }
}

// ───────────────────────────────────────────────────────────────
// Raw GPIO input
// ───────────────────────────────────────────────────────────────

/// `InputPin` over a GPIO configured by
/// [`hw_init::init_peripherals`](crate::drivers::hw_init::init_peripherals).
pub struct GpioInput {
    gpio: i32,
}

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl embedded_hal::digital::ErrorType for GpioInput {
    type Error = core::convert::Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(crate::drivers::hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!crate::drivers::hw_init::gpio_read(self.gpio))
    }
}
