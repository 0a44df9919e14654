//! Unified error types for the rotator firmware.
//!
//! `Error` covers the fallible bootstrap steps (peripheral bring-up and
//! configuration).  Radio failures are a separate [`HardwareError`]: the
//! rotation scheduler records them and carries on, so they never reach the
//! bootstrap path.  All variants are `Copy` so they can be passed through the
//! scheduler and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Bootstrap failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Advertiser / radio errors
// ---------------------------------------------------------------------------

/// Failures reported by an [`AdvertiserPort`](crate::app::ports::AdvertiserPort).
///
/// The numeric payloads carry the raw `esp_err_t` from the radio stack.
/// The rotation scheduler never propagates these; it logs and counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// An operation was attempted before the radio stack was brought up.
    NotInitialized,
    /// Controller / host stack bring-up failed.
    StackInit(i32),
    /// Advertising interval bounds were rejected.
    IntervalConfig(i32),
    /// Installing the advertisement data failed.
    Payload(i32),
    /// Starting the advertisement failed.
    Start(i32),
    /// Stopping the advertisement failed.
    Stop(i32),
    /// The encoded advertisement does not fit a legacy 31-byte PDU.
    PayloadTooLong,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "radio not initialised"),
            Self::StackInit(rc) => write!(f, "BLE stack init failed (rc={rc})"),
            Self::IntervalConfig(rc) => write!(f, "advertising interval rejected (rc={rc})"),
            Self::Payload(rc) => write!(f, "advertisement data rejected (rc={rc})"),
            Self::Start(rc) => write!(f, "advertising start failed (rc={rc})"),
            Self::Stop(rc) => write!(f, "advertising stop failed (rc={rc})"),
            Self::PayloadTooLong => write!(f, "advertisement exceeds 31 bytes"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
