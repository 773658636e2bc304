//! Outbound application events.
//!
//! The [`ClimateSupervisor`](super::service::ClimateSupervisor) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them.

use crate::control::heater::HeaterPhase;
use crate::error::Error;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Start-up finished: relays safe, vent closed, screen drawn.
    Started {
        poll_interval_ms: u32,
        logging_enabled: bool,
    },

    /// The heater moved between Off, Heating and Waiting.
    HeaterPhaseChanged { from: HeaterPhase, to: HeaterPhase },

    /// The cooler was switched on or off.
    CoolerChanged { active: bool },

    /// One poll cycle completed.
    Telemetry(TelemetryData),

    /// A relay, servo, display or storage call failed.  Control continues.
    HardwareFault(Error),
}

/// State of the chamber at the end of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub poll: u64,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub heater: HeaterPhase,
    pub cooler_active: bool,
    /// Hardware faults reported during this cycle.
    pub faults: u8,
}
