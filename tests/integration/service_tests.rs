//! Integration tests for the buttons → panel → scheduler pipeline.
//!
//! Button pins are simulated with shared cells so the debounced edge
//! detectors run exactly as they do in the control loop.

use std::cell::Cell;
use std::convert::Infallible;

use crate::mock_hw::{MockAdvertiser, RecordingDisplay, RecordingSink};

use ble_rotator::app::commands::PanelCommand;
use ble_rotator::app::events::AppEvent;
use ble_rotator::app::panel::OperatorSettings;
use ble_rotator::app::service::RotatorService;
use ble_rotator::config::RotatorConfig;
use ble_rotator::drivers::button::{ButtonDriver, ButtonEvent};
use ble_rotator::rotation::RotationPhase;
use embedded_hal::digital::{ErrorType, InputPin};

struct SharedPin<'a>(&'a Cell<bool>);

impl ErrorType for SharedPin<'_> {
    type Error = Infallible;
}

impl InputPin for SharedPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

struct Rig {
    service: RotatorService<MockAdvertiser>,
    display: RecordingDisplay,
    sink: RecordingSink,
}

fn make_rig() -> Rig {
    let mut rig = Rig {
        service: RotatorService::new(&RotatorConfig::default()),
        display: RecordingDisplay::new(),
        sink: RecordingSink::new(),
    };
    rig.service.initialize(MockAdvertiser::new(), &mut rig.sink);
    rig.service.start(&mut rig.display, &mut rig.sink);
    rig
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn boot_screen_and_defaults() {
    let rig = make_rig();
    assert_eq!(rig.display.last(), ("Devices: 5", "Status: OFF"));
    assert_eq!(rig.service.settings(), OperatorSettings::default());
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::Started(OperatorSettings::default())));
}

// ── Physical button presses drive the panel ──────────────────

#[test]
fn debounced_presses_reach_the_panel() {
    let mut rig = make_rig();
    // Active-low: released = high.
    let a_level = Cell::new(true);
    let b_level = Cell::new(true);
    let mut button_a = ButtonDriver::active_low(SharedPin(&a_level), 20);
    let mut button_b = ButtonDriver::active_low(SharedPin(&b_level), 20);

    let mut run = |rig: &mut Rig, from: u64, to: u64| {
        for now in (from..to).step_by(10) {
            let mut commands = Vec::new();
            if button_a.tick(now) == Some(ButtonEvent::Pressed) {
                commands.push(PanelCommand::IncrementCount);
            }
            if button_b.tick(now) == Some(ButtonEvent::Pressed) {
                commands.push(PanelCommand::ToggleEnabled);
            }
            rig.service
                .tick(&commands, now, &mut rig.display, &mut rig.sink);
        }
    };

    // Hold A for 100 ms: exactly one increment.
    a_level.set(false);
    run(&mut rig, 0, 100);
    a_level.set(true);
    run(&mut rig, 100, 200);
    assert_eq!(rig.service.settings().identity_count, 6);
    assert_eq!(rig.display.last(), ("Devices: 6", "Status: OFF"));

    // Tap B: broadcasting starts on the tick the press is confirmed.
    b_level.set(false);
    run(&mut rig, 200, 260);
    b_level.set(true);
    run(&mut rig, 260, 300);
    assert!(rig.service.settings().enabled);
    assert_eq!(rig.display.last(), ("Devices: 6", "Status: ON"));
    assert!(matches!(
        rig.service.scheduler().phase(),
        RotationPhase::Advertising(_)
    ));
}

#[test]
fn short_glitch_is_ignored() {
    let mut rig = make_rig();
    let level = Cell::new(true);
    let mut button = ButtonDriver::active_low(SharedPin(&level), 20);

    level.set(false);
    assert_eq!(button.tick(0), None);
    level.set(true);
    assert_eq!(button.tick(10), None);
    assert_eq!(button.tick(40), None);

    rig.service.tick(&[], 40, &mut rig.display, &mut rig.sink);
    assert_eq!(rig.service.settings().identity_count, 5);
}

// ── Panel bounds ─────────────────────────────────────────────

#[test]
fn count_saturates_at_ten() {
    let mut rig = make_rig();
    for step in 0..8u64 {
        rig.service.tick(
            &[PanelCommand::IncrementCount],
            step * 10,
            &mut rig.display,
            &mut rig.sink,
        );
    }
    assert_eq!(rig.service.settings().identity_count, 10);
    assert_eq!(rig.display.last().0, "Devices: 10");
    let changes = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SettingsChanged(_)))
        .count();
    assert_eq!(changes, 5);
}

// ── Full session ─────────────────────────────────────────────

#[test]
fn toggle_on_rotate_toggle_off() {
    let mut rig = make_rig();
    rig.service
        .tick(&[PanelCommand::ToggleEnabled], 0, &mut rig.display, &mut rig.sink);
    for t in (10..=1_000).step_by(10) {
        rig.service.tick(&[], t, &mut rig.display, &mut rig.sink);
    }
    rig.service
        .tick(&[PanelCommand::ToggleEnabled], 1_010, &mut rig.display, &mut rig.sink);

    let radio = rig.service.scheduler().advertiser().unwrap();
    assert_eq!(radio.broadcast_indices(), vec![0, 1, 2, 3, 4, 0]);
    assert!(!radio.broadcasting);
    assert_eq!(rig.service.scheduler().phase(), RotationPhase::Idle);
    assert_eq!(rig.sink.count_stopped(), 1);
}

#[test]
fn growing_count_while_enabled_extends_rotation() {
    let mut rig = make_rig();
    rig.service
        .tick(&[PanelCommand::ToggleEnabled], 0, &mut rig.display, &mut rig.sink);
    for t in [200, 400, 600] {
        rig.service.tick(&[], t, &mut rig.display, &mut rig.sink);
    }
    // Index 4 is next; three more identities arrive before it airs.
    let grow = [PanelCommand::IncrementCount; 3];
    rig.service.tick(&grow, 800, &mut rig.display, &mut rig.sink);
    for t in [1_000, 1_200, 1_400, 1_600] {
        rig.service.tick(&[], t, &mut rig.display, &mut rig.sink);
    }

    let radio = rig.service.scheduler().advertiser().unwrap();
    assert_eq!(radio.broadcast_indices(), vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
}
