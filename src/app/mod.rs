//! Application core: pure domain logic, zero I/O.
//!
//! Threshold evaluation, heater duty cycling and cooler control live here.
//! All interaction with the sensor, clock, servo, screen and log storage
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
