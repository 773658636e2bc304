//! Servo-driven vent hatch.
//!
//! The servo is only powered while it moves: each transition writes the
//! target angle, energises the servo supply relay, blocks for
//! [`SETTLE_DELAY_MS`] so the hatch can finish travelling, then releases
//! the relay again.  The relay is never left energised between calls.
//!
//! The settle delay blocks the calling context.  Vent moves happen at
//! most once per heater/cooler activation edge.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;
use serde::Serialize;

use crate::app::ports::ServoPort;
use crate::drivers::relay::Relay;
use crate::error::{first_error, Result};

/// Time the servo supply stays on per move.
pub const SETTLE_DELAY_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VentSnapshot {
    pub relay_pin: u8,
    pub servo_pin: u8,
    pub servo_channel: u8,
    pub open_angle: u8,
    pub close_angle: u8,
    pub is_open: bool,
}

/// Geometry and wiring of the vent servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VentServo {
    pub pin: u8,
    pub channel: u8,
    pub open_angle: u8,
    pub close_angle: u8,
}

pub struct VentController<P, S, D> {
    relay: Relay<P>,
    servo: S,
    delay: D,
    geometry: VentServo,
    is_open: bool,
}

impl<P: OutputPin, S: ServoPort, D: DelayNs> VentController<P, S, D> {
    pub fn new(relay: P, relay_gpio: u8, servo: S, geometry: VentServo, delay: D) -> Self {
        Self {
            relay: Relay::new(relay, relay_gpio),
            servo,
            delay,
            geometry,
            is_open: false,
        }
    }

    /// Release the servo supply and attach the servo channel to its pin.
    pub fn init(&mut self) -> Result<()> {
        let relay = self.relay.release();
        let attach: Result<()> = self
            .servo
            .attach(self.geometry.channel, self.geometry.pin)
            .map_err(Into::into);
        first_error([relay, attach])
    }

    pub fn open(&mut self) -> Result<()> {
        let res = self.travel(self.geometry.open_angle);
        self.is_open = true;
        info!("vent open ({}°)", self.geometry.open_angle);
        res
    }

    pub fn close(&mut self) -> Result<()> {
        let res = self.travel(self.geometry.close_angle);
        self.is_open = false;
        info!("vent closed ({}°)", self.geometry.close_angle);
        res
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn servo(&self) -> &S {
        &self.servo
    }

    pub fn snapshot(&self) -> VentSnapshot {
        VentSnapshot {
            relay_pin: self.relay.gpio(),
            servo_pin: self.geometry.pin,
            servo_channel: self.geometry.channel,
            open_angle: self.geometry.open_angle,
            close_angle: self.geometry.close_angle,
            is_open: self.is_open,
        }
    }

    fn travel(&mut self, angle: u8) -> Result<()> {
        let write: Result<()> = self
            .servo
            .write_angle(self.geometry.channel, angle)
            .map_err(Into::into);
        let power = self.relay.energize();
        self.delay.delay_ms(SETTLE_DELAY_MS);
        let release = self.relay.release();
        first_error([write, power, release])
    }
}
