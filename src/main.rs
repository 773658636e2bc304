//! Incubator controller, host simulation entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SimChamber        SimPin x4      SimServo   HostDelay   │
//! │  (Sensor+Clock)    (OutputPin)    (Servo)    (DelayNs)   │
//! │  LogDisplay        CsvFileStore   LogEventSink           │
//! │  (Display)         (LogStore)     (EventSink)            │
//! │                                                          │
//! │  ───────────────── Port Trait Boundary ────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        ClimateSupervisor (pure logic)              │  │
//! │  │  Heater · Cooler · FanBank · Vent                  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `INCUBATOR_CONFIG` names an optional JSON config file; `RUST_LOG`
//! controls verbosity (default `info`).

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use incubator::adapters::config_file::JsonConfigFile;
use incubator::adapters::csv_store::CsvFileStore;
use incubator::adapters::display::LogDisplay;
use incubator::adapters::log_sink::LogEventSink;
use incubator::adapters::sim::{ChamberModel, ChamberProbes, SimChamber, SimPin, SimServo};
use incubator::adapters::time::{HostClock, HostDelay};
use incubator::app::ports::ConfigPort;
use incubator::app::service::{ClimateSupervisor, Relays};
use incubator::config::IncubatorConfig;
use incubator::pins;

const CONFIG_ENV: &str = "INCUBATOR_CONFIG";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("incubator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => JsonConfigFile::new(path)
            .load()
            .with_context(|| format!("loading config from ${CONFIG_ENV}"))?,
        None => IncubatorConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    if config.logging_enabled {
        let parent = Path::new(&config.log_path).parent();
        if let Some(dir) = parent.filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
    }

    // ── 3. Simulated hardware ─────────────────────────────────
    let relays = Relays {
        fan_mode: SimPin::new(pins::FAN_MODE_GPIO),
        fan: SimPin::new(pins::FAN_GPIO),
        vent: SimPin::new(pins::VENT_RELAY_GPIO),
        heater: SimPin::new(pins::HEATER_GPIO),
    };
    let servo = SimServo::new(config.vent_close_angle);
    let probes = ChamberProbes {
        heater: relays.heater.probe(),
        fan: relays.fan.probe(),
        vent: servo.probe(),
        vent_open_angle: config.vent_open_angle,
    };
    let mut chamber = SimChamber::new(HostClock::new(), ChamberModel::default(), probes);
    let mut display = LogDisplay::new();
    let mut store = CsvFileStore::new(".");
    let mut sink = LogEventSink::new();

    // ── 4. Supervisor ─────────────────────────────────────────
    let mut supervisor = ClimateSupervisor::new(config, relays, servo, HostDelay);
    supervisor.start(&mut chamber, &mut display, &mut store, &mut sink);
    info!(
        "devices: {}",
        serde_json::to_string(&supervisor.snapshot()).context("serialising snapshot")?
    );

    supervisor.run(&mut chamber, &mut display, &mut store, &mut sink, &mut HostDelay)
}
