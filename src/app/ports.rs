//! Port traits: the hexagonal boundary between the rotator and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RotationScheduler / OperatorPanel
//! ```
//!
//! Driven adapters (radio, clock, screen, event sinks) implement these
//! traits.  The core consumes them via generics, so the domain logic never
//! touches ESP-IDF directly and every port can be mocked on the host.

use crate::error::HardwareError;
use crate::identity::Identity;

use super::panel::PanelFrame;

// ───────────────────────────────────────────────────────────────
// Advertiser port (driven adapter: domain → radio)
// ───────────────────────────────────────────────────────────────

/// Connectionless BLE advertising capability.
///
/// All calls are synchronous and bounded.  The radio cannot swap the
/// advertisement payload while broadcasting, so callers stop, install the
/// new payload and start again.
pub trait AdvertiserPort {
    /// Bring up the radio stack.  Does not start advertising.
    fn init(&mut self) -> Result<(), HardwareError>;

    /// Set the advertising interval bounds (0.625 ms units).
    fn set_interval_bounds(&mut self, min: u16, max: u16) -> Result<(), HardwareError>;

    /// Install `identity` as the active advertisement data.
    fn set_payload(&mut self, identity: &Identity) -> Result<(), HardwareError>;

    /// Start broadcasting the installed payload.
    fn start(&mut self) -> Result<(), HardwareError>;

    /// Stop broadcasting.  Must succeed (as a no-op) when already stopped.
    fn stop(&mut self) -> Result<(), HardwareError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic, non-decreasing time source.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: panel → screen)
// ───────────────────────────────────────────────────────────────

/// Renders the operator panel's current frame.
pub trait DisplayPort {
    fn draw(&mut self, frame: &PanelFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
