//! End-to-end rotation timelines against a recording radio.

use crate::mock_hw::{MockAdvertiser, RadioCall, RecordingSink};

use ble_rotator::app::events::AppEvent;
use ble_rotator::config::RotatorConfig;
use ble_rotator::identity::decode_adv_data;
use ble_rotator::rotation::{RotationPhase, RotationScheduler};

fn make_scheduler() -> (RotationScheduler<MockAdvertiser>, RecordingSink) {
    let mut sched = RotationScheduler::new(&RotatorConfig::default());
    let mut sink = RecordingSink::new();
    sched.initialize(MockAdvertiser::new(), &mut sink);
    (sched, sink)
}

fn radio(sched: &RotationScheduler<MockAdvertiser>) -> &MockAdvertiser {
    sched.advertiser().expect("scheduler initialised")
}

// ── Steady rotation at the switch interval ───────────────────

#[test]
fn five_identities_at_interval_spacing() {
    let (mut sched, mut sink) = make_scheduler();
    for t in [0, 200, 400, 600, 800] {
        sched.tick(true, 5, t, &mut sink);
    }
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1, 2, 3, 4]);
    assert_eq!(sched.phase(), RotationPhase::Advertising(4));
    assert_eq!(sched.current_index(), 0);
}

// ── Rate limiting ────────────────────────────────────────────

#[test]
fn tick_inside_interval_is_skipped() {
    let (mut sched, mut sink) = make_scheduler();
    sched.tick(true, 3, 0, &mut sink);
    sched.tick(true, 3, 150, &mut sink);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0]);
    assert_eq!(sched.last_rotate_ms(), Some(0));

    sched.tick(true, 3, 200, &mut sink);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1]);
    assert_eq!(sched.last_rotate_ms(), Some(200));
}

// ── Disable / re-enable preserves position ───────────────────

#[test]
fn disable_then_resume_continues_sequence() {
    let (mut sched, mut sink) = make_scheduler();
    sched.tick(true, 5, 0, &mut sink);
    sched.tick(false, 5, 200, &mut sink);
    assert_eq!(sched.phase(), RotationPhase::Idle);
    assert!(!radio(&sched).broadcasting);

    sched.tick(true, 5, 400, &mut sink);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1]);
    assert_eq!(sched.phase(), RotationPhase::Advertising(1));
}

// ── Count grows mid-rotation ─────────────────────────────────

#[test]
fn growing_count_extends_cycle_without_reset() {
    let (mut sched, mut sink) = make_scheduler();
    for t in [0, 200, 400, 600] {
        sched.tick(true, 5, t, &mut sink);
    }
    assert_eq!(sched.current_index(), 4);

    sched.tick(true, 8, 800, &mut sink);
    assert_eq!(sched.current_index(), 5);
    sched.tick(true, 8, 1_000, &mut sink);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1, 2, 3, 4, 5]);
}

// ── Disabled path ────────────────────────────────────────────

#[test]
fn repeated_disable_is_idempotent() {
    let (mut sched, mut sink) = make_scheduler();
    sched.tick(true, 5, 0, &mut sink);
    for t in 1..=10 {
        sched.tick(false, 5, t * 10, &mut sink);
    }
    assert_eq!(sink.count_stopped(), 1);
    assert_eq!(sched.phase(), RotationPhase::Idle);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0]);
    assert!(!radio(&sched).broadcasting);
}

#[test]
fn disabled_from_boot_never_starts() {
    let (mut sched, mut sink) = make_scheduler();
    for t in 0..10 {
        sched.tick(false, 5, t * 200, &mut sink);
    }
    assert_eq!(radio(&sched).count(&RadioCall::Start), 0);
    assert_eq!(sink.count_stopped(), 0);
}

// ── Over-the-air bytes ───────────────────────────────────────

#[test]
fn aired_payloads_decode_to_expected_identities() {
    let (mut sched, mut sink) = make_scheduler();
    for step in 0..3u64 {
        sched.tick(true, 3, step * 200, &mut sink);
    }
    let aired = &radio(&sched).aired;
    assert_eq!(aired.len(), 3);
    for (i, raw) in aired.iter().enumerate() {
        let adv = decode_adv_data(raw).unwrap();
        assert_eq!(adv.name.unwrap().as_str(), format!("BLE_Device_{}", i + 1));
        assert_eq!(adv.vendor.unwrap().as_slice(), &[0x01, i as u8, 0xAA, 0x55]);
    }
}

#[test]
fn rotated_events_follow_broadcasts() {
    let (mut sched, mut sink) = make_scheduler();
    sched.tick(true, 2, 0, &mut sink);
    sched.tick(true, 2, 200, &mut sink);
    let rotated: Vec<usize> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Rotated { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(rotated, vec![0, 1]);
}

// ── Radio faults ─────────────────────────────────────────────

#[test]
fn failed_init_still_allows_ticks() {
    let mut sched = RotationScheduler::new(&RotatorConfig::default());
    let mut sink = RecordingSink::new();
    let adv = MockAdvertiser {
        fail_init: true,
        ..MockAdvertiser::default()
    };
    sched.initialize(adv, &mut sink);
    assert_eq!(sink.faults(), 1);

    sched.tick(true, 5, 0, &mut sink);
    assert_eq!(radio(&sched).broadcast_indices(), vec![0]);
}

#[test]
fn payload_failure_does_not_stall_rotation() {
    let mut sched = RotationScheduler::new(&RotatorConfig::default());
    let mut sink = RecordingSink::new();
    let adv = MockAdvertiser {
        fail_payload: true,
        ..MockAdvertiser::default()
    };
    sched.initialize(adv, &mut sink);

    for t in [0, 200, 400] {
        sched.tick(true, 3, t, &mut sink);
    }
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1, 2]);
    assert_eq!(sched.stats().hardware_faults, 3);
    assert_eq!(sink.faults(), 3);
}

// ── Custom cadence ───────────────────────────────────────────

#[test]
fn configured_interval_is_honoured() {
    let config = RotatorConfig {
        rotate_interval_ms: 500,
        ..RotatorConfig::default()
    };
    let mut sched = RotationScheduler::new(&config);
    let mut sink = RecordingSink::new();
    sched.initialize(MockAdvertiser::new(), &mut sink);

    for t in [0, 200, 400, 500, 999, 1_000] {
        sched.tick(true, 4, t, &mut sink);
    }
    assert_eq!(radio(&sched).broadcast_indices(), vec![0, 1, 2]);
}
