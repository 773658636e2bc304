//! Circulation fan: a power relay and a speed-select relay.
//!
//! The speed relay switches the fan supply between two voltages.
//! Released (HIGH) selects the slow voltage, which is also the safe
//! default at boot.  The power relay switches the fan on and off.
//!
//! Both relays are shared by the heater and the cooler, so they are
//! bundled in a [`FanBank`] owned by the supervisor and lent out per call.

use embedded_hal::digital::OutputPin;
use serde::Serialize;

use crate::drivers::relay::Relay;
use crate::error::{first_error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FanSpeed {
    Slow,
    Fast,
}

// ── Speed select ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FanSpeedSnapshot {
    pub pin: u8,
    pub speed: FanSpeed,
}

pub struct FanSpeedController<P> {
    relay: Relay<P>,
    speed: FanSpeed,
}

impl<P: OutputPin> FanSpeedController<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            relay: Relay::new(pin, gpio),
            speed: FanSpeed::Slow,
        }
    }

    /// Drive the relay to the slow (safe) default.
    pub fn init(&mut self) -> Result<()> {
        self.slow()
    }

    pub fn slow(&mut self) -> Result<()> {
        self.speed = FanSpeed::Slow;
        self.relay.release()
    }

    pub fn fast(&mut self) -> Result<()> {
        self.speed = FanSpeed::Fast;
        self.relay.energize()
    }

    pub fn speed(&self) -> FanSpeed {
        self.speed
    }

    pub fn snapshot(&self) -> FanSpeedSnapshot {
        FanSpeedSnapshot {
            pin: self.relay.gpio(),
            speed: self.speed,
        }
    }
}

// ── Power ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FanSnapshot {
    pub pin: u8,
    pub on: bool,
}

pub struct FanController<P> {
    relay: Relay<P>,
}

impl<P: OutputPin> FanController<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            relay: Relay::new(pin, gpio),
        }
    }

    /// Drive the relay off.
    pub fn init(&mut self) -> Result<()> {
        self.off()
    }

    pub fn on(&mut self) -> Result<()> {
        self.relay.energize()
    }

    pub fn off(&mut self) -> Result<()> {
        self.relay.release()
    }

    pub fn is_on(&self) -> bool {
        self.relay.is_energized()
    }

    pub fn snapshot(&self) -> FanSnapshot {
        FanSnapshot {
            pin: self.relay.gpio(),
            on: self.is_on(),
        }
    }
}

// ── Shared bank ───────────────────────────────────────────────

/// The fan relays shared by heater and cooler.
pub struct FanBank<P> {
    pub speed: FanSpeedController<P>,
    pub power: FanController<P>,
}

impl<P: OutputPin> FanBank<P> {
    pub fn new(speed: FanSpeedController<P>, power: FanController<P>) -> Self {
        Self { speed, power }
    }

    pub fn init(&mut self) -> Result<()> {
        first_error([self.speed.init(), self.power.init()])
    }

    /// Select `speed`, then switch the fan on.
    pub fn run(&mut self, speed: FanSpeed) -> Result<()> {
        let select = match speed {
            FanSpeed::Slow => self.speed.slow(),
            FanSpeed::Fast => self.speed.fast(),
        };
        first_error([select, self.power.on()])
    }

    /// Switch the fan off.  The speed selection is left as is.
    pub fn stop(&mut self) -> Result<()> {
        self.power.off()
    }
}
