//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(s) => {
                info!(
                    "START | devices={} | status={}",
                    s.identity_count,
                    if s.enabled { "ON" } else { "OFF" }
                );
            }
            AppEvent::Rotated { index, name } => {
                info!("ADV   | #{} '{}'", index, name);
            }
            AppEvent::Stopped => {
                info!("ADV   | stopped");
            }
            AppEvent::SettingsChanged(s) => {
                info!(
                    "PANEL | devices={} | status={}",
                    s.identity_count,
                    if s.enabled { "ON" } else { "OFF" }
                );
            }
            AppEvent::HardwareFault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
