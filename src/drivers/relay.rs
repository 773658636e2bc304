//! Active-low relay output.
//!
//! Every actuator on the board sits behind a relay module whose input is
//! active-low: driving the pin HIGH leaves the coil de-energised (off),
//! driving it LOW energises it.  [`Relay`] hides that inversion so the
//! device drivers above can speak in terms of "energise" and "release".
//!
//! The recorded level always follows the last command, even if the pin
//! write reported an error.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::error::{ActuatorError, Result};

pub struct Relay<P> {
    pin: P,
    gpio: u8,
    energized: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Wrap an already-configured output.  Nothing is written until
    /// [`release`](Self::release) or [`energize`](Self::energize).
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            pin,
            gpio,
            energized: false,
        }
    }

    /// Drive the pin LOW (coil energised).
    pub fn energize(&mut self) -> Result<()> {
        self.energized = true;
        let res = self.pin.set_low();
        self.check(res)
    }

    /// Drive the pin HIGH (coil released, safe state).
    pub fn release(&mut self) -> Result<()> {
        self.energized = false;
        let res = self.pin.set_high();
        self.check(res)
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub fn gpio(&self) -> u8 {
        self.gpio
    }

    fn check(&self, res: core::result::Result<(), P::Error>) -> Result<()> {
        res.map_err(|e| {
            warn!("relay GPIO{} write failed: {:?}", self.gpio, e.kind());
            ActuatorError::GpioWriteFailed.into()
        })
    }
}
