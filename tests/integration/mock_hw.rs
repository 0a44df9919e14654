//! Mock radio, screen and sink for integration tests.
//!
//! The advertiser records every call and keeps the encoded payload it was
//! handed, so tests can decode exactly what a scanner would have seen.

use ble_rotator::app::events::AppEvent;
use ble_rotator::app::panel::PanelFrame;
use ble_rotator::app::ports::{AdvertiserPort, DisplayPort, EventSink};
use ble_rotator::error::HardwareError;
use ble_rotator::identity::Identity;

// ── Advertiser call record ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RadioCall {
    Init,
    Bounds { min: u16, max: u16 },
    Payload { index: usize },
    Start,
    Stop,
}

// ── MockAdvertiser ────────────────────────────────────────────

#[derive(Default)]
pub struct MockAdvertiser {
    pub calls: Vec<RadioCall>,
    /// Raw advertising data for every installed payload, in order.
    pub aired: Vec<Vec<u8>>,
    pub broadcasting: bool,
    pub fail_init: bool,
    pub fail_payload: bool,
}

#[allow(dead_code)]
impl MockAdvertiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity indices handed to the radio, in order.
    pub fn broadcast_indices(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RadioCall::Payload { index } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &RadioCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl AdvertiserPort for MockAdvertiser {
    fn init(&mut self) -> Result<(), HardwareError> {
        self.calls.push(RadioCall::Init);
        if self.fail_init {
            return Err(HardwareError::StackInit(-1));
        }
        Ok(())
    }

    fn set_interval_bounds(&mut self, min: u16, max: u16) -> Result<(), HardwareError> {
        self.calls.push(RadioCall::Bounds { min, max });
        Ok(())
    }

    fn set_payload(&mut self, identity: &Identity) -> Result<(), HardwareError> {
        self.calls.push(RadioCall::Payload {
            index: identity.index,
        });
        if self.fail_payload {
            return Err(HardwareError::Payload(-1));
        }
        self.aired.push(identity.encode_adv_data()?.to_vec());
        Ok(())
    }

    fn start(&mut self) -> Result<(), HardwareError> {
        self.calls.push(RadioCall::Start);
        self.broadcasting = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        self.calls.push(RadioCall::Stop);
        self.broadcasting = false;
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_stopped(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Stopped))
            .count()
    }

    pub fn faults(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::HardwareFault(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── RecordingDisplay ──────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<PanelFrame>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> (&str, &str) {
        let frame = self.frames.last().expect("nothing drawn yet");
        (frame.devices_line.as_str(), frame.status_line.as_str())
    }
}

impl DisplayPort for RecordingDisplay {
    fn draw(&mut self, frame: &PanelFrame) {
        self.frames.push(frame.clone());
    }
}
