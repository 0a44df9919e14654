//! System configuration parameters
//!
//! All tunable parameters for the rotator.  Settings are never persisted;
//! a JSON override may be baked in at build time through the
//! `BLE_ROTATOR_CONFIG` environment variable.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Compile-time JSON override, e.g.
/// `BLE_ROTATOR_CONFIG='{"rotate_interval_ms":500}' cargo build`.
const CONFIG_OVERRIDE: Option<&str> = option_env!("BLE_ROTATOR_CONFIG");

/// Hard upper bound on identities; the panel never exceeds it.
pub const IDENTITY_COUNT_LIMIT: u8 = 10;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    // --- Rotation ---
    /// Minimum time between identity switches (milliseconds)
    pub rotate_interval_ms: u64,

    // --- Radio ---
    /// Minimum advertising interval (0.625 ms units)
    pub adv_interval_min: u16,
    /// Maximum advertising interval (0.625 ms units)
    pub adv_interval_max: u16,

    // --- Operator panel ---
    /// Identity count at power-on
    pub default_identity_count: u8,
    /// Upper bound for the identity count button
    pub max_identity_count: u8,
    /// Button debounce window (milliseconds)
    pub debounce_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            // Rotation
            rotate_interval_ms: 200,

            // Radio: 20 ms .. 40 ms
            adv_interval_min: 0x20,
            adv_interval_max: 0x40,

            // Panel
            default_identity_count: 5,
            max_identity_count: IDENTITY_COUNT_LIMIT,
            debounce_ms: 20,

            // Timing
            control_loop_interval_ms: 10,
            watchdog_timeout_ms: 5_000,
        }
    }
}

impl RotatorConfig {
    /// Parse a (possibly partial) JSON override; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON override"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build-time override if present and valid, defaults otherwise.
    pub fn load() -> Self {
        match CONFIG_OVERRIDE {
            None => Self::default(),
            Some(json) => match Self::from_json(json) {
                Ok(cfg) => {
                    info!("Config: using BLE_ROTATOR_CONFIG override");
                    cfg
                }
                Err(e) => {
                    warn!("Config: override rejected ({}), using defaults", e);
                    Self::default()
                }
            },
        }
    }

    /// Reject values that would break the rotation or panel invariants.
    pub fn validate(&self) -> Result<()> {
        if self.rotate_interval_ms == 0 {
            return Err(Error::Config("rotate_interval_ms must be > 0"));
        }
        // Bluetooth Core limits: 0x0020 ..= 0x4000 (20 ms .. 10.24 s)
        if self.adv_interval_min < 0x20 || self.adv_interval_max > 0x4000 {
            return Err(Error::Config("advertising interval outside 0x20..=0x4000"));
        }
        if self.adv_interval_min > self.adv_interval_max {
            return Err(Error::Config("adv_interval_min above adv_interval_max"));
        }
        if self.max_identity_count == 0 || self.max_identity_count > IDENTITY_COUNT_LIMIT {
            return Err(Error::Config("max_identity_count must be 1..=10"));
        }
        if self.default_identity_count == 0
            || self.default_identity_count > self.max_identity_count
        {
            return Err(Error::Config("default_identity_count outside 1..=max"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if u64::from(self.watchdog_timeout_ms) <= u64::from(self.control_loop_interval_ms) {
            return Err(Error::Config("watchdog_timeout_ms must exceed the loop interval"));
        }
        Ok(())
    }
}
