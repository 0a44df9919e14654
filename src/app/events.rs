//! Outbound application events.
//!
//! The scheduler and the service emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder, ...).

use crate::error::HardwareError;
use crate::identity::IdentityName;

use super::panel::OperatorSettings;

/// Structured events emitted by the rotator core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the power-on settings).
    Started(OperatorSettings),

    /// An identity was (re)broadcast.
    Rotated { index: usize, name: IdentityName },

    /// Broadcasting stopped after at least one identity went out.
    Stopped,

    /// The operator changed the count or the enable flag.
    SettingsChanged(OperatorSettings),

    /// A radio call failed.  Never retried; the next rotation tries again.
    HardwareFault(HardwareError),
}
