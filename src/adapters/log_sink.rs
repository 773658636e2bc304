//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr through `env_logger` on the host, the serial
//! console on the board).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                debug!(
                    "TELEM | poll={} | T={:.1}\u{00b0}C RH={:.1}% | heater={:?} cooler={} | \
                     faults={}",
                    t.poll,
                    t.temperature_c,
                    t.humidity_pct,
                    t.heater,
                    if t.cooler_active { "on" } else { "off" },
                    t.faults,
                );
            }
            AppEvent::HeaterPhaseChanged { from, to } => {
                info!("HEATER | {:?} -> {:?}", from, to);
            }
            AppEvent::CoolerChanged { active } => {
                info!("COOLER | {}", if *active { "on" } else { "off" });
            }
            AppEvent::HardwareFault(e) => {
                warn!("FAULT | {e}");
            }
            AppEvent::Started {
                poll_interval_ms,
                logging_enabled,
            } => {
                info!(
                    "START | poll={}ms logging={}",
                    poll_interval_ms, logging_enabled
                );
            }
        }
    }
}
