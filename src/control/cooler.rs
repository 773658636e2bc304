//! Passive cooler: open vent plus fast fan.
//!
//! Binary state.  Cooling runs until the chamber is back at or below the
//! target temperature; there is no time limit.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;
use serde::Serialize;

use crate::app::ports::ServoPort;
use crate::drivers::fan::{FanBank, FanSpeed};
use crate::drivers::vent::VentController;
use crate::error::{first_error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoolerSnapshot {
    pub target_temp_c: f32,
    pub is_active: bool,
}

pub struct CoolerController<P, S, D> {
    vent: VentController<P, S, D>,
    target_temp_c: f32,
    active: bool,
}

impl<P: OutputPin, S: ServoPort, D: DelayNs> CoolerController<P, S, D> {
    pub fn new(vent: VentController<P, S, D>, target_temp_c: f32) -> Self {
        Self {
            vent,
            target_temp_c,
            active: false,
        }
    }

    /// Open the vent (blocks for the settle delay), then run the fan fast.
    /// Does nothing if already active.
    pub fn on<F: OutputPin>(&mut self, fans: &mut FanBank<F>) -> Result<()> {
        if self.active {
            return Ok(());
        }
        info!("cooler on (target {:.1}°C)", self.target_temp_c);
        let vent = self.vent.open();
        self.active = true;
        first_error([vent, fans.run(FanSpeed::Fast)])
    }

    /// Close the vent and stop the fan.  No-op while inactive.
    pub fn off<F: OutputPin>(&mut self, fans: &mut FanBank<F>) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        info!("cooler off");
        let vent = self.vent.close();
        self.active = false;
        first_error([vent, fans.stop()])
    }

    /// Release once the chamber is at or below target.  No-op while inactive.
    pub fn check<F: OutputPin>(&mut self, temperature_c: f32, fans: &mut FanBank<F>) -> Result<()> {
        if self.active && temperature_c <= self.target_temp_c {
            return self.off(fans);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn vent(&self) -> &VentController<P, S, D> {
        &self.vent
    }

    pub fn vent_mut(&mut self) -> &mut VentController<P, S, D> {
        &mut self.vent
    }

    pub fn snapshot(&self) -> CoolerSnapshot {
        CoolerSnapshot {
            target_temp_c: self.target_temp_c,
            is_active: self.active,
        }
    }
}
