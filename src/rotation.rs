//! Advertisement rotation scheduler.
//!
//! Decides, once per control tick, whether to stop broadcasting, wait, or
//! switch to the next synthetic identity.  Switches are rate-limited
//! against a monotonic millisecond clock.
//!
//! ```text
//!                 enabled && elapsed >= interval
//!        ┌──────────────────────────────────────────┐
//!        │                                          ▼
//!   ┌─────────┐   enabled && elapsed >= interval  ┌──────────────────┐
//!   │  Idle   │ ─────────────────────────────────▶│ Advertising(i)   │──┐
//!   └─────────┘ ◀──────────────────────────────── └──────────────────┘  │
//!        ▲              !enabled                     │    ▲            │
//!        └── !enabled (stop re-issued every tick)    └────┘ elapsed <  │
//!                                                    interval (no-op)  │
//!                                   Advertising(i) → Advertising(i+1 mod n)
//! ```
//!
//! The scheduler exclusively owns the advertiser handle.  Radio failures
//! are logged, counted and reported as [`AppEvent::HardwareFault`]; they
//! never propagate to the caller.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{AdvertiserPort, EventSink};
use crate::config::RotatorConfig;
use crate::error::HardwareError;
use crate::identity::Identity;

// ═══════════════════════════════════════════════════════════════
//  State
// ═══════════════════════════════════════════════════════════════

/// Observable broadcast state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    /// Not broadcasting.
    Idle,
    /// Broadcasting the identity with this index.
    Advertising(usize),
}

/// Running counters, useful for the log and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationStats {
    /// Identities handed to the radio.
    pub broadcasts: u32,
    /// Radio calls that returned an error.
    pub hardware_faults: u32,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct RotationScheduler<A: AdvertiserPort> {
    advertiser: Option<A>,
    /// Next identity to broadcast.
    current_index: usize,
    /// `None` until the first switch, so the first enabled tick broadcasts
    /// immediately.
    last_rotate_ms: Option<u64>,
    rotate_interval_ms: u64,
    adv_interval_min: u16,
    adv_interval_max: u16,
    phase: RotationPhase,
    stats: RotationStats,
}

impl<A: AdvertiserPort> RotationScheduler<A> {
    pub fn new(config: &RotatorConfig) -> Self {
        Self {
            advertiser: None,
            current_index: 0,
            last_rotate_ms: None,
            rotate_interval_ms: config.rotate_interval_ms,
            adv_interval_min: config.adv_interval_min,
            adv_interval_max: config.adv_interval_max,
            phase: RotationPhase::Idle,
            stats: RotationStats::default(),
        }
    }

    /// Take ownership of the advertiser, bring the radio up and configure
    /// the interval bounds.  Leaves broadcasting stopped.
    ///
    /// A second call is ignored; the first handle stays in place.
    pub fn initialize(&mut self, mut advertiser: A, sink: &mut impl EventSink) {
        if self.advertiser.is_some() {
            warn!("Rotation: already initialised, ignoring second advertiser");
            return;
        }

        let init = advertiser.init();
        self.record(init, sink);
        let bounds = advertiser.set_interval_bounds(self.adv_interval_min, self.adv_interval_max);
        self.record(bounds, sink);

        info!(
            "Rotation: advertiser ready (interval 0x{:02X}..0x{:02X}, rotate every {}ms)",
            self.adv_interval_min, self.adv_interval_max, self.rotate_interval_ms
        );
        self.advertiser = Some(advertiser);
    }

    /// Per-iteration decision.  Call once per control loop tick.
    ///
    /// * `enabled`: operator wants broadcasting on.  Checked every tick
    ///   (level, not edge): while off, `stop()` is re-issued each time.
    /// * `identity_count`: size of the rotation.  `0` is treated as `1`.
    /// * `now_ms`: monotonic time.
    pub fn tick(
        &mut self,
        enabled: bool,
        identity_count: usize,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) {
        if self.advertiser.is_none() {
            debug!("Rotation: tick before initialise, ignored");
            return;
        }

        if !enabled {
            self.stop(sink);
            return;
        }

        if let Some(last) = self.last_rotate_ms {
            if now_ms.saturating_sub(last) < self.rotate_interval_ms {
                return;
            }
        }
        self.last_rotate_ms = Some(now_ms);

        let count = identity_count.max(1);
        if self.current_index >= count {
            self.current_index %= count;
        }

        let index = self.current_index;
        self.broadcast(index, sink);
        self.current_index = (index + 1) % count;
    }

    /// Stop broadcasting.  Idempotent; a no-op before [`initialize`].
    ///
    /// [`initialize`]: Self::initialize
    pub fn stop(&mut self, sink: &mut impl EventSink) {
        let Some(adv) = self.advertiser.as_mut() else {
            return;
        };
        let result = adv.stop();
        self.record(result, sink);

        if let RotationPhase::Advertising(index) = self.phase {
            info!("Rotation: stopped (last identity {})", index);
            self.phase = RotationPhase::Idle;
            sink.emit(&AppEvent::Stopped);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    /// Index of the identity the next switch will broadcast.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_rotate_ms(&self) -> Option<u64> {
        self.last_rotate_ms
    }

    pub fn stats(&self) -> RotationStats {
        self.stats
    }

    /// Borrow the advertiser (tests inspect mock call logs through this).
    pub fn advertiser(&self) -> Option<&A> {
        self.advertiser.as_ref()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Stop, install the identity, restart.  The radio cannot swap payloads
    /// while broadcasting, so the gap between stop and start is unavoidable.
    fn broadcast(&mut self, index: usize, sink: &mut impl EventSink) {
        let identity = Identity::for_index(index);
        let Some(adv) = self.advertiser.as_mut() else {
            return;
        };

        let stopped = adv.stop();
        let installed = adv.set_payload(&identity);
        let started = adv.start();
        self.record(stopped, sink);
        self.record(installed, sink);
        self.record(started, sink);

        self.stats.broadcasts = self.stats.broadcasts.wrapping_add(1);
        self.phase = RotationPhase::Advertising(index);
        debug!("Rotation: advertising '{}'", identity.name);
        sink.emit(&AppEvent::Rotated {
            index,
            name: identity.name,
        });
    }

    fn record(&mut self, result: Result<(), HardwareError>, sink: &mut impl EventSink) {
        if let Err(e) = result {
            warn!("Rotation: radio call failed ({})", e);
            self.stats.hardware_faults = self.stats.hardware_faults.wrapping_add(1);
            sink.emit(&AppEvent::HardwareFault(e));
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
