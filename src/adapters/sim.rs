//! Simulated incubator hardware for host runs.
//!
//! - [`SimPin`]: relay output whose level lives in a shared atomic, so
//!   the chamber model can see what the controller drives.
//! - [`SimServo`]: single-channel servo that publishes its angle the same
//!   way.
//! - [`SimChamber`]: first-order thermal model implementing
//!   [`SensorPort`] and forwarding [`ClockPort`] to the wrapped clock.
//!
//! The model integrates lazily on every sensor read: the chamber loses
//! heat towards ambient, gains heat while the heater relay is energised,
//! and sheds heat quickly while the vent is open and the fan runs.

use core::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use crate::app::ports::{ClockPort, SensorPort, ServoPort};
use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Relay pin
// ───────────────────────────────────────────────────────────────

/// Simulated push-pull output.  Starts HIGH (relay released).
pub struct SimPin {
    gpio: u8,
    high: Arc<AtomicBool>,
}

/// Read-only view of a [`SimPin`].
#[derive(Clone)]
pub struct SimPinProbe {
    high: Arc<AtomicBool>,
}

impl SimPin {
    pub fn new(gpio: u8) -> Self {
        Self {
            gpio,
            high: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn probe(&self) -> SimPinProbe {
        SimPinProbe {
            high: Arc::clone(&self.high),
        }
    }
}

impl SimPinProbe {
    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::Relaxed)
    }

    /// Active-low: a LOW pin means the relay is energised.
    pub fn relay_energized(&self) -> bool {
        !self.is_high()
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.high.swap(false, Ordering::Relaxed) {
            debug!("GPIO{} -> LOW", self.gpio);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high.swap(true, Ordering::Relaxed) {
            debug!("GPIO{} -> HIGH", self.gpio);
        }
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Servo
// ───────────────────────────────────────────────────────────────

/// Single-channel simulated servo.  Writes to an unattached channel fail.
pub struct SimServo {
    attached: Option<(u8, u8)>,
    angle: Arc<AtomicU8>,
}

#[derive(Clone)]
pub struct SimServoProbe {
    angle: Arc<AtomicU8>,
}

impl SimServo {
    pub fn new(initial_angle: u8) -> Self {
        Self {
            attached: None,
            angle: Arc::new(AtomicU8::new(initial_angle)),
        }
    }

    pub fn probe(&self) -> SimServoProbe {
        SimServoProbe {
            angle: Arc::clone(&self.angle),
        }
    }
}

impl SimServoProbe {
    pub fn angle(&self) -> u8 {
        self.angle.load(Ordering::Relaxed)
    }
}

impl ServoPort for SimServo {
    fn attach(&mut self, channel: u8, pin: u8) -> Result<(), ActuatorError> {
        debug!("servo channel {channel} attached to GPIO{pin}");
        self.attached = Some((channel, pin));
        Ok(())
    }

    fn write_angle(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError> {
        match self.attached {
            Some((ch, _)) if ch == channel && angle <= 180 => {
                self.angle.store(angle, Ordering::Relaxed);
                Ok(())
            }
            _ => Err(ActuatorError::ServoWriteFailed),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Chamber model
// ───────────────────────────────────────────────────────────────

/// Physical constants of the simulated chamber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamberModel {
    /// Room temperature (°C).
    pub ambient_temp_c: f32,
    /// Room relative humidity (%).
    pub ambient_humidity_pct: f32,
    /// Fraction of the indoor/outdoor difference lost per second, vent shut.
    pub leak_per_sec: f32,
    /// Same, with the vent open and the fan running.
    pub vent_per_sec: f32,
    /// Heater contribution while energised (°C/s).
    pub heater_c_per_sec: f32,
    /// Moisture the eggs and water tray add per second (%/s).
    pub evaporation_pct_per_sec: f32,
}

impl Default for ChamberModel {
    fn default() -> Self {
        Self {
            ambient_temp_c: 24.0,
            ambient_humidity_pct: 45.0,
            leak_per_sec: 0.002,
            vent_per_sec: 0.02,
            heater_c_per_sec: 0.08,
            evaporation_pct_per_sec: 0.05,
        }
    }
}

/// Wiring between the model and the simulated actuators.
pub struct ChamberProbes {
    pub heater: SimPinProbe,
    pub fan: SimPinProbe,
    pub vent: SimServoProbe,
    pub vent_open_angle: u8,
}

pub struct SimChamber<C> {
    clock: C,
    model: ChamberModel,
    probes: ChamberProbes,
    temperature_c: f32,
    humidity_pct: f32,
    last_ms: u32,
}

impl<C: ClockPort> SimChamber<C> {
    /// Start at ambient conditions.
    pub fn new(clock: C, model: ChamberModel, probes: ChamberProbes) -> Self {
        let last_ms = clock.now_millis();
        Self {
            clock,
            temperature_c: model.ambient_temp_c,
            humidity_pct: model.ambient_humidity_pct,
            model,
            probes,
            last_ms,
        }
    }

    pub fn with_temperature(mut self, celsius: f32) -> Self {
        self.temperature_c = celsius;
        self
    }

    fn vent_flowing(&self) -> bool {
        self.probes.vent.angle() == self.probes.vent_open_angle && self.probes.fan.relay_energized()
    }

    fn advance(&mut self) {
        let now = self.clock.now_millis();
        let dt = now.wrapping_sub(self.last_ms) as f32 / 1000.0;
        self.last_ms = now;
        if dt <= 0.0 {
            return;
        }

        let m = self.model;
        let exchange = if self.vent_flowing() {
            m.vent_per_sec
        } else {
            m.leak_per_sec
        };
        // Exponential approach, capped so a long step cannot overshoot.
        let k = (exchange * dt).min(1.0);
        self.temperature_c -= (self.temperature_c - m.ambient_temp_c) * k;
        if self.probes.heater.relay_energized() {
            self.temperature_c += m.heater_c_per_sec * dt;
        }

        let dry = (self.humidity_pct - m.ambient_humidity_pct).max(0.0) * k;
        self.humidity_pct =
            (self.humidity_pct - dry + m.evaporation_pct_per_sec * dt).clamp(0.0, 100.0);
    }
}

impl<C: ClockPort> SensorPort for SimChamber<C> {
    fn read_temperature(&mut self) -> f32 {
        self.advance();
        self.temperature_c
    }

    fn read_humidity(&mut self) -> f32 {
        self.advance();
        self.humidity_pct
    }
}

impl<C: ClockPort> ClockPort for SimChamber<C> {
    fn now_millis(&self) -> u32 {
        self.clock.now_millis()
    }
}
