//! Climate supervisor, the hexagonal core.
//!
//! [`ClimateSupervisor`] owns every device and runs the poll loop.  Sensor,
//! clock, display, log storage and event sink are ports injected at call
//! sites, so the whole service runs against mock adapters in tests.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ DisplayPort
//!    ClockPort ──▶ │    ClimateSupervisor     │ ──▶ LogStorePort
//!                  │ Heater · Cooler · Fans   │ ──▶ EventSink
//!                  └──────────────────────────┘
//! ```
//!
//! Ownership is one-directional: the supervisor owns the heater, the
//! cooler (which owns the vent) and the shared [`FanBank`], and lends the
//! fans to whichever controller is acting.
//!
//! Hardware failures are reported through the event sink and never change
//! control flow.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};
use serde::Serialize;

use crate::config::IncubatorConfig;
use crate::control::cooler::{CoolerController, CoolerSnapshot};
use crate::control::heater::{HeaterController, HeaterPhase, HeaterSnapshot};
use crate::datalog::{self, LogRecord};
use crate::display::{render_status, ScreenStatus};
use crate::drivers::fan::{
    FanBank, FanController, FanSnapshot, FanSpeedController, FanSpeedSnapshot,
};
use crate::drivers::vent::{VentController, VentServo, VentSnapshot};
use crate::error::{first_error, Error, Result};
use crate::pins;

use super::commands::{
    Action, CommandError, CommandResponse, Device, DeviceCommand, DeviceSnapshot,
};
use super::events::{AppEvent, TelemetryData};
use super::ports::{ClockPort, DisplayPort, EventSink, LogStorePort, SensorPort, ServoPort};

// ───────────────────────────────────────────────────────────────
// Construction inputs and outputs
// ───────────────────────────────────────────────────────────────

/// The four relay outputs, already configured as push-pull outputs.
pub struct Relays<P> {
    pub fan_mode: P,
    pub fan: P,
    pub vent: P,
    pub heater: P,
}

/// Result of one [`ClimateSupervisor::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The poll interval has not elapsed yet.
    Waiting { remaining_ms: u32 },
    /// A poll cycle ran.
    Polled(TelemetryData),
}

/// Every device's attributes at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupervisorSnapshot {
    pub fan_mode: FanSpeedSnapshot,
    pub fan: FanSnapshot,
    pub vent: VentSnapshot,
    pub heater: HeaterSnapshot,
    pub cooler: CoolerSnapshot,
    pub last_poll_ms: u32,
    pub polls: u64,
}

// ───────────────────────────────────────────────────────────────
// ClimateSupervisor
// ───────────────────────────────────────────────────────────────

pub struct ClimateSupervisor<P, S, D> {
    config: IncubatorConfig,
    fans: FanBank<P>,
    heater: HeaterController<P>,
    cooler: CoolerController<P, S, D>,
    last_poll_ms: u32,
    polls: u64,
}

impl<P, S, D> ClimateSupervisor<P, S, D>
where
    P: OutputPin,
    S: ServoPort,
    D: DelayNs,
{
    /// Build every device from `config`.  No hardware is touched until
    /// [`start`](Self::start).
    pub fn new(config: IncubatorConfig, relays: Relays<P>, servo: S, delay: D) -> Self {
        let fans = FanBank::new(
            FanSpeedController::new(relays.fan_mode, pins::FAN_MODE_GPIO),
            FanController::new(relays.fan, pins::FAN_GPIO),
        );
        let heater = HeaterController::new(
            relays.heater,
            pins::HEATER_GPIO,
            config.heater_on_secs,
            config.heater_off_secs,
            config.target_temp_c,
        );
        let geometry = VentServo {
            pin: pins::VENT_SERVO_GPIO,
            channel: config.servo_channel,
            open_angle: config.vent_open_angle,
            close_angle: config.vent_close_angle,
        };
        let vent = VentController::new(relays.vent, pins::VENT_RELAY_GPIO, servo, geometry, delay);
        let cooler = CoolerController::new(vent, config.target_temp_c);

        Self {
            config,
            fans,
            heater,
            cooler,
            last_poll_ms: 0,
            polls: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every relay to its safe state, force the vent closed, draw
    /// the idle screen and create the data log.  Call once before
    /// [`tick`](Self::tick).
    pub fn start(
        &mut self,
        hw: &mut (impl SensorPort + ClockPort),
        display: &mut impl DisplayPort,
        store: &mut impl LogStorePort,
        sink: &mut impl EventSink,
    ) {
        let fans = self.fans.init();
        report(sink, fans);
        let vent = self.cooler.vent_mut().init();
        report(sink, vent);
        let closed = self.cooler.vent_mut().close();
        report(sink, closed);
        let heater = self.heater.init();
        report(sink, heater);

        let status = ScreenStatus {
            temperature_c: hw.read_temperature(),
            humidity_pct: hw.read_humidity(),
            heater_active: false,
            cooler_active: false,
        };
        report(sink, draw(display, &status));

        if self.config.logging_enabled {
            let created = store
                .create(&self.config.log_path, datalog::HEADER)
                .map_err(Error::from);
            report(sink, created);
        }

        self.last_poll_ms = hw.now_millis();
        info!(
            "supervisor started: band {:.1}..{:.1}°C, target {:.1}°C, poll every {}ms",
            self.config.min_temp_c,
            self.config.max_temp_c,
            self.config.target_temp_c,
            self.config.poll_interval_ms
        );
        sink.emit(&AppEvent::Started {
            poll_interval_ms: self.config.poll_interval_ms,
            logging_enabled: self.config.logging_enabled,
        });
    }

    /// Run the loop forever, sleeping out the remainder of each interval.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ClockPort),
        display: &mut impl DisplayPort,
        store: &mut impl LogStorePort,
        sink: &mut impl EventSink,
        idle: &mut impl DelayNs,
    ) -> ! {
        loop {
            if let TickOutcome::Waiting { remaining_ms } = self.tick(hw, display, store, sink) {
                idle.delay_ms(remaining_ms);
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One pass of the loop body: run a poll cycle if the interval has
    /// elapsed since the previous one.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ClockPort),
        display: &mut impl DisplayPort,
        store: &mut impl LogStorePort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        let now = hw.now_millis();
        let elapsed = now.wrapping_sub(self.last_poll_ms);
        if elapsed < self.config.poll_interval_ms {
            return TickOutcome::Waiting {
                remaining_ms: self.config.poll_interval_ms - elapsed,
            };
        }
        self.last_poll_ms = now;
        TickOutcome::Polled(self.poll_cycle(now, hw, display, store, sink))
    }

    /// Evaluate thresholds, drive the heater/cooler, refresh the screen and
    /// append the data-log row.
    pub fn poll_cycle(
        &mut self,
        now_ms: u32,
        hw: &mut impl SensorPort,
        display: &mut impl DisplayPort,
        store: &mut impl LogStorePort,
        sink: &mut impl EventSink,
    ) -> TelemetryData {
        self.polls += 1;
        let temperature_c = hw.read_temperature();
        let humidity_pct = hw.read_humidity();
        let before = (self.heater.phase(), self.cooler.is_active());
        let mut faults = 0u8;

        // Heater branch
        if self.heater.is_active() {
            let res = self.heater.check(now_ms, temperature_c, &mut self.fans);
            faults += report(sink, res);
        } else if temperature_c < self.config.min_temp_c {
            if self.cooler.is_active() {
                let res = self.cooler.off(&mut self.fans);
                faults += report(sink, res);
            }
            let res = self.heater.on(now_ms, &mut self.fans);
            faults += report(sink, res);
        }

        // Cooler branch
        if self.cooler.is_active() {
            let res = self.cooler.check(temperature_c, &mut self.fans);
            faults += report(sink, res);
        } else if temperature_c > self.config.max_temp_c {
            let res = self.heater.off(&mut self.fans);
            faults += report(sink, res);
            let res = self.cooler.on(&mut self.fans);
            faults += report(sink, res);
        }

        self.emit_transitions(before, sink);

        let status = ScreenStatus {
            temperature_c,
            humidity_pct,
            heater_active: self.heater.is_active(),
            cooler_active: self.cooler.is_active(),
        };
        faults += report(sink, draw(display, &status));

        if self.config.logging_enabled {
            let record = LogRecord {
                temperature_c,
                humidity_pct,
                heater: self.heater.phase(),
                cooler_active: self.cooler.is_active(),
            };
            let path = self.config.log_path.as_str();
            let res = record
                .to_line()
                .and_then(|line| store.append_line(path, &line))
                .map_err(Error::from);
            faults += report(sink, res);
        }

        let telemetry = TelemetryData {
            poll: self.polls,
            temperature_c,
            humidity_pct,
            heater: self.heater.phase(),
            cooler_active: self.cooler.is_active(),
            faults,
        };
        sink.emit(&AppEvent::Telemetry(telemetry));
        telemetry
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a manual device command.  Rejected commands change nothing.
    pub fn handle_command(
        &mut self,
        cmd: DeviceCommand,
        hw: &mut (impl SensorPort + ClockPort),
        sink: &mut impl EventSink,
    ) -> core::result::Result<CommandResponse, CommandError> {
        if !cmd.is_supported() {
            return Err(CommandError::Unsupported(cmd));
        }
        if cmd.action == Action::Status {
            return Ok(CommandResponse::Snapshot(self.device_snapshot(cmd.device)));
        }

        let before = (self.heater.phase(), self.cooler.is_active());
        let res = match (cmd.device, cmd.action) {
            (Device::FanMode, Action::Init) => self.fans.speed.init(),
            (Device::FanMode, Action::Slow) => self.fans.speed.slow(),
            (Device::FanMode, Action::Fast) => self.fans.speed.fast(),
            (Device::Fan, Action::Init) => self.fans.power.init(),
            (Device::Fan, Action::On) => self.fans.power.on(),
            (Device::Fan, Action::Off) => self.fans.power.off(),
            (Device::Vent, Action::Init) => self.cooler.vent_mut().init(),
            (Device::Vent, Action::Open) => self.cooler.vent_mut().open(),
            (Device::Vent, Action::Close) => self.cooler.vent_mut().close(),
            (Device::Heater, Action::Init) => self.heater.init(),
            (Device::Heater, Action::On) => {
                let handoff = self.release_cooler();
                let on = self.heater.on(hw.now_millis(), &mut self.fans);
                first_error([handoff, on])
            }
            (Device::Heater, Action::Off) => self.heater.off(&mut self.fans),
            (Device::Heater, Action::Check) => {
                let now = hw.now_millis();
                let t = hw.read_temperature();
                self.heater.check(now, t, &mut self.fans)
            }
            (Device::Cooler, Action::On) => {
                let handoff = self.release_heater();
                let on = self.cooler.on(&mut self.fans);
                first_error([handoff, on])
            }
            (Device::Cooler, Action::Off) => self.cooler.off(&mut self.fans),
            (Device::Cooler, Action::Check) => {
                let t = hw.read_temperature();
                self.cooler.check(t, &mut self.fans)
            }
            _ => return Err(CommandError::Unsupported(cmd)),
        };
        report(sink, res);
        self.emit_transitions(before, sink);
        Ok(CommandResponse::Done)
    }

    /// Heater and cooler share the fan bank; a manual start takes it over
    /// from whichever one currently holds it.
    fn release_cooler(&mut self) -> Result<()> {
        if self.cooler.is_active() {
            self.cooler.off(&mut self.fans)
        } else {
            Ok(())
        }
    }

    fn release_heater(&mut self) -> Result<()> {
        if self.heater.is_active() {
            self.heater.off(&mut self.fans)
        } else {
            Ok(())
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn device_snapshot(&self, device: Device) -> DeviceSnapshot {
        match device {
            Device::FanMode => DeviceSnapshot::FanMode(self.fans.speed.snapshot()),
            Device::Fan => DeviceSnapshot::Fan(self.fans.power.snapshot()),
            Device::Vent => DeviceSnapshot::Vent(self.cooler.vent().snapshot()),
            Device::Heater => DeviceSnapshot::Heater(self.heater.snapshot()),
            Device::Cooler => DeviceSnapshot::Cooler(self.cooler.snapshot()),
        }
    }

    pub fn snapshot(&self) -> SupervisorSnapshot {
        SupervisorSnapshot {
            fan_mode: self.fans.speed.snapshot(),
            fan: self.fans.power.snapshot(),
            vent: self.cooler.vent().snapshot(),
            heater: self.heater.snapshot(),
            cooler: self.cooler.snapshot(),
            last_poll_ms: self.last_poll_ms,
            polls: self.polls,
        }
    }

    pub fn heater(&self) -> &HeaterController<P> {
        &self.heater
    }

    pub fn cooler(&self) -> &CoolerController<P, S, D> {
        &self.cooler
    }

    pub fn fans(&self) -> &FanBank<P> {
        &self.fans
    }

    pub fn config(&self) -> &IncubatorConfig {
        &self.config
    }

    /// Poll cycles run since start-up.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_transitions(&self, (phase, cooling): (HeaterPhase, bool), sink: &mut impl EventSink) {
        let now_phase = self.heater.phase();
        if now_phase != phase {
            sink.emit(&AppEvent::HeaterPhaseChanged {
                from: phase,
                to: now_phase,
            });
        }
        if self.cooler.is_active() != cooling {
            sink.emit(&AppEvent::CoolerChanged {
                active: self.cooler.is_active(),
            });
        }
    }
}

/// Log and forward a hardware failure.  Returns the number of faults (0 or 1).
fn report(sink: &mut impl EventSink, res: Result<()>) -> u8 {
    match res {
        Ok(()) => 0,
        Err(e) => {
            warn!("hardware fault: {e}");
            sink.emit(&AppEvent::HardwareFault(e));
            1
        }
    }
}

fn draw(display: &mut impl DisplayPort, status: &ScreenStatus) -> Result<()> {
    render_status(display, status).map_err(|e| {
        warn!("display: {:?}", e);
        Error::Display
    })
}
