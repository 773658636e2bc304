//! Host time adapters.
//!
//! - [`HostClock`] implements [`ClockPort`] with `std::time::Instant`,
//!   truncated to a wrapping `u32` millisecond counter like a board tick.
//! - [`HostDelay`] implements `embedded_hal::delay::DelayNs` by sleeping
//!   the current thread.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

pub struct HostClock {
    start: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for HostClock {
    fn now_millis(&self) -> u32 {
        // Truncation is the rollover.
        self.start.elapsed().as_millis() as u32
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
