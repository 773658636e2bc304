//! CSV data-log record format.
//!
//! One row per poll cycle: raw temperature, raw humidity, heater state
//! code, cooler state code.

use core::fmt::{self, Write};

use crate::control::heater::HeaterPhase;
use crate::error::StorageError;

/// Default log file on the card.
pub const DEFAULT_LOG_PATH: &str = "log.csv";

/// Header written once when the log is created.
pub const HEADER: &str = "TMP,HUM,Heater,Cooler";

/// Heater code while the element is energised.
pub const HEATER_CODE_HEATING: u8 = 10;
/// Heater code while active but between heating phases.
pub const HEATER_CODE_WAITING: u8 = 5;
/// Cooler code while the vent is open and the fan is fast.
pub const COOLER_CODE_ACTIVE: u8 = 15;
/// Code for an inactive device.
pub const CODE_OFF: u8 = 0;

/// Fixed-capacity line buffer for one record.
pub type LogLine = heapless::String<64>;

/// One data-log row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRecord {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub heater: HeaterPhase,
    pub cooler_active: bool,
}

impl LogRecord {
    pub fn heater_code(&self) -> u8 {
        match self.heater {
            HeaterPhase::Heating => HEATER_CODE_HEATING,
            HeaterPhase::Waiting => HEATER_CODE_WAITING,
            HeaterPhase::Off => CODE_OFF,
        }
    }

    pub fn cooler_code(&self) -> u8 {
        if self.cooler_active {
            COOLER_CODE_ACTIVE
        } else {
            CODE_OFF
        }
    }

    /// Render the record without a trailing newline.
    pub fn to_line(&self) -> Result<LogLine, StorageError> {
        let mut line = LogLine::new();
        write!(line, "{self}").map_err(|_| StorageError::LineTooLong)?;
        Ok(line)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?},{:?},{},{}",
            self.temperature_c,
            self.humidity_pct,
            self.heater_code(),
            self.cooler_code()
        )
    }
}
