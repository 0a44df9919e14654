//! Operator panel state and rendering.
//!
//! Two user-settable values live here: how many identities to cycle and
//! whether broadcasting is on.  The panel is pure state; button sampling
//! happens in [`drivers::button`](crate::drivers::button) and pixels are
//! pushed by a [`DisplayPort`](super::ports::DisplayPort) adapter.
//!
//! Screen layout:
//!
//! ```text
//! Devices: 5
//!
//! Status: OFF
//! ```

use core::fmt::Write;

use crate::config::{IDENTITY_COUNT_LIMIT, RotatorConfig};

use super::commands::PanelCommand;

/// Values the operator controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSettings {
    /// Identities in the rotation, always within `1..=max`.
    pub identity_count: u8,
    /// Broadcasting requested.
    pub enabled: bool,
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            identity_count: 5,
            enabled: false,
        }
    }
}

/// One rendered screen: a line per value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    pub devices_line: heapless::String<16>,
    pub status_line: heapless::String<16>,
}

pub struct OperatorPanel {
    settings: OperatorSettings,
    max_identity_count: u8,
}

impl OperatorPanel {
    pub fn new(config: &RotatorConfig) -> Self {
        let max = config.max_identity_count.clamp(1, IDENTITY_COUNT_LIMIT);
        Self {
            settings: OperatorSettings {
                identity_count: config.default_identity_count.clamp(1, max),
                enabled: false,
            },
            max_identity_count: max,
        }
    }

    pub fn settings(&self) -> OperatorSettings {
        self.settings
    }

    /// Apply a command.  Returns `true` when a value changed and the screen
    /// must be redrawn.
    pub fn apply(&mut self, cmd: PanelCommand) -> bool {
        match cmd {
            PanelCommand::IncrementCount => {
                if self.settings.identity_count < self.max_identity_count {
                    self.settings.identity_count += 1;
                    true
                } else {
                    false
                }
            }
            PanelCommand::ToggleEnabled => {
                self.settings.enabled = !self.settings.enabled;
                true
            }
        }
    }

    pub fn render(&self) -> PanelFrame {
        let mut devices_line = heapless::String::new();
        let mut status_line = heapless::String::new();
        let _ = write!(devices_line, "Devices: {}", self.settings.identity_count);
        let _ = write!(
            status_line,
            "Status: {}",
            if self.settings.enabled { "ON" } else { "OFF" }
        );
        PanelFrame {
            devices_line,
            status_line,
        }
    }
}
