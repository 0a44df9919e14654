//! Application service: the hexagonal core.
//!
//! [`RotatorService`] owns the operator panel and the rotation scheduler.
//! All I/O flows through port traits injected at call sites, so the whole
//! service runs against mock adapters on the host.
//!
//! ```text
//!  PanelCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                   │     RotatorService      │ ──▶ DisplayPort
//!  AdvertiserPort ◀─│  Panel · Scheduler      │
//!                   └────────────────────────┘
//! ```
//!
//! One control tick applies the pending panel commands first and then lets
//! the scheduler act on the updated settings, so a toggle takes effect in
//! the same iteration it was pressed.

use log::info;

use crate::config::RotatorConfig;
use crate::rotation::RotationScheduler;

use super::commands::PanelCommand;
use super::events::AppEvent;
use super::panel::{OperatorPanel, OperatorSettings};
use super::ports::{AdvertiserPort, DisplayPort, EventSink};

/// The application service orchestrates all domain logic.
pub struct RotatorService<A: AdvertiserPort> {
    panel: OperatorPanel,
    scheduler: RotationScheduler<A>,
    tick_count: u64,
}

impl<A: AdvertiserPort> RotatorService<A> {
    /// Construct the service from configuration.
    ///
    /// The radio is not touched until [`initialize`](Self::initialize).
    pub fn new(config: &RotatorConfig) -> Self {
        Self {
            panel: OperatorPanel::new(config),
            scheduler: RotationScheduler::new(config),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Hand the advertiser to the scheduler and bring the radio up.
    pub fn initialize(&mut self, advertiser: A, sink: &mut impl EventSink) {
        self.scheduler.initialize(advertiser, sink);
    }

    /// Draw the power-on screen and announce the initial settings.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        display.draw(&self.panel.render());
        let settings = self.panel.settings();
        sink.emit(&AppEvent::Started(settings));
        info!(
            "RotatorService started (devices={}, enabled={})",
            settings.identity_count, settings.enabled
        );
    }

    /// Stop broadcasting.  Safe to call at any time.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) {
        self.scheduler.stop(sink);
    }

    // ── Commands ──────────────────────────────────────────────

    /// Apply one panel command.  Redraws and emits
    /// [`AppEvent::SettingsChanged`] only when a value actually changed.
    pub fn handle_command(
        &mut self,
        cmd: PanelCommand,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if !self.panel.apply(cmd) {
            return false;
        }
        display.draw(&self.panel.render());
        sink.emit(&AppEvent::SettingsChanged(self.panel.settings()));
        true
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: panel commands, then the rotation decision.
    pub fn tick(
        &mut self,
        commands: &[PanelCommand],
        now_ms: u64,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count = self.tick_count.wrapping_add(1);

        for &cmd in commands {
            self.handle_command(cmd, display, sink);
        }

        let settings = self.panel.settings();
        self.scheduler.tick(
            settings.enabled,
            usize::from(settings.identity_count),
            now_ms,
            sink,
        );
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn settings(&self) -> OperatorSettings {
        self.panel.settings()
    }

    pub fn scheduler(&self) -> &RotationScheduler<A> {
        &self.scheduler
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
