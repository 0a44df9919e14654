//! Application core: pure domain logic, zero I/O.
//!
//! The operator panel state, the commands that drive it, the events the
//! core emits and the service tying them to the rotation scheduler.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod commands;
pub mod events;
pub mod panel;
pub mod ports;
pub mod service;
