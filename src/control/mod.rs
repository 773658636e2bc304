//! Temperature actuators built on top of the relay drivers.

pub mod cooler;
pub mod heater;
