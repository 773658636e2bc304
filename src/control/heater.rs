//! Duty-cycled heater.
//!
//! ```text
//!          on()                [elapsed >= on_secs]
//!  OFF ───────────▶ HEATING ─────────────────────▶ WAITING
//!   ▲                  ▲                              │
//!   │                  └────[elapsed >= off_secs]─────┘
//!   │
//!   └──── off() or temperature >= target (from any phase)
//! ```
//!
//! While active the shared fan runs at slow speed to spread the heat.
//! `start_ms` is stamped on every phase change and is the only basis for
//! phase timing.  The over-temperature cut-off is evaluated before the
//! duty-cycle timers on every check.

use embedded_hal::digital::OutputPin;
use log::info;
use serde::Serialize;

use crate::drivers::fan::{FanBank, FanSpeed};
use crate::drivers::relay::Relay;
use crate::error::{first_error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaterPhase {
    Off,
    Heating,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaterSnapshot {
    pub on_secs: u32,
    pub off_secs: u32,
    pub target_temp_c: f32,
    pub pin: u8,
    pub phase: HeaterPhase,
    pub is_active: bool,
}

pub struct HeaterController<P> {
    relay: Relay<P>,
    on_secs: u32,
    off_secs: u32,
    target_temp_c: f32,
    phase: HeaterPhase,
    start_ms: u32,
}

impl<P: OutputPin> HeaterController<P> {
    pub fn new(pin: P, gpio: u8, on_secs: u32, off_secs: u32, target_temp_c: f32) -> Self {
        Self {
            relay: Relay::new(pin, gpio),
            on_secs,
            off_secs,
            target_temp_c,
            phase: HeaterPhase::Off,
            start_ms: 0,
        }
    }

    /// Drive the heater relay off.
    pub fn init(&mut self) -> Result<()> {
        self.relay.release()
    }

    /// Start duty cycling: fan slow and on, then the first heating phase.
    /// Does nothing if already active.
    pub fn on<F: OutputPin>(&mut self, now_ms: u32, fans: &mut FanBank<F>) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        info!("heater on (target {:.1}°C)", self.target_temp_c);
        let fan = fans.run(FanSpeed::Slow);
        let relay = self.enter(HeaterPhase::Heating, now_ms);
        first_error([fan, relay])
    }

    /// Stop heating from any phase.
    ///
    /// Safe to call repeatedly.  On an inactive heater only the relay is
    /// re-released; the shared fan is left alone since the cooler may own it.
    pub fn off<F: OutputPin>(&mut self, fans: &mut FanBank<F>) -> Result<()> {
        if !self.is_active() {
            return self.relay.release();
        }
        info!("heater off");
        let relay = self.relay.release();
        self.phase = HeaterPhase::Off;
        first_error([relay, fans.stop()])
    }

    /// Per-poll bookkeeping.  No-op while inactive.
    pub fn check<F: OutputPin>(
        &mut self,
        now_ms: u32,
        temperature_c: f32,
        fans: &mut FanBank<F>,
    ) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }

        // A NaN reading compares false against everything; treat it as hot.
        if temperature_c.is_nan() || temperature_c >= self.target_temp_c {
            info!(
                "heater cut-off: {:.1}°C >= target {:.1}°C",
                temperature_c, self.target_temp_c
            );
            return self.off(fans);
        }

        let elapsed_ms = now_ms.wrapping_sub(self.start_ms);
        match self.phase {
            HeaterPhase::Heating if elapsed_ms >= secs_to_ms(self.on_secs) => {
                self.enter(HeaterPhase::Waiting, now_ms)
            }
            HeaterPhase::Waiting if elapsed_ms >= secs_to_ms(self.off_secs) => {
                self.enter(HeaterPhase::Heating, now_ms)
            }
            _ => Ok(()),
        }
    }

    pub fn phase(&self) -> HeaterPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != HeaterPhase::Off
    }

    pub fn is_heating(&self) -> bool {
        self.phase == HeaterPhase::Heating
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == HeaterPhase::Waiting
    }

    /// Timestamp of the last phase change.
    pub fn phase_started_ms(&self) -> u32 {
        self.start_ms
    }

    pub fn snapshot(&self) -> HeaterSnapshot {
        HeaterSnapshot {
            on_secs: self.on_secs,
            off_secs: self.off_secs,
            target_temp_c: self.target_temp_c,
            pin: self.relay.gpio(),
            phase: self.phase,
            is_active: self.is_active(),
        }
    }

    fn enter(&mut self, phase: HeaterPhase, now_ms: u32) -> Result<()> {
        log::debug!("heater {:?} -> {:?}", self.phase, phase);
        self.start_ms = now_ms;
        self.phase = phase;
        match phase {
            HeaterPhase::Heating => self.relay.energize(),
            HeaterPhase::Waiting | HeaterPhase::Off => self.relay.release(),
        }
    }
}

fn secs_to_ms(secs: u32) -> u32 {
    secs.saturating_mul(1000)
}
