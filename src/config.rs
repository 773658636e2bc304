//! System configuration parameters
//!
//! All tunable parameters for the incubator.  Values can be overridden
//! from a JSON file through [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncubatorConfig {
    // --- Thresholds ---
    /// Below this temperature (Celsius) the heater is started
    pub min_temp_c: f32,
    /// Above this temperature (Celsius) the cooler is started
    pub max_temp_c: f32,
    /// Heater cut-off and cooler release temperature (Celsius)
    pub target_temp_c: f32,

    // --- Heater duty cycle ---
    /// Length of one heating phase (seconds)
    pub heater_on_secs: u32,
    /// Length of one waiting phase between heating phases (seconds)
    pub heater_off_secs: u32,

    // --- Vent ---
    /// Servo channel driving the vent hatch
    pub servo_channel: u8,
    /// Servo angle with the vent open (degrees)
    pub vent_open_angle: u8,
    /// Servo angle with the vent closed (degrees)
    pub vent_close_angle: u8,

    // --- Timing ---
    /// Poll interval of the supervisor loop (milliseconds)
    pub poll_interval_ms: u32,

    // --- Data log ---
    /// Append one CSV record per poll cycle
    pub logging_enabled: bool,
    /// CSV log file path
    pub log_path: String,
}

impl Default for IncubatorConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            min_temp_c: 28.0,
            max_temp_c: 32.0,
            target_temp_c: 30.0,

            // Heater
            heater_on_secs: 30,
            heater_off_secs: 30,

            // Vent
            servo_channel: 1,
            vent_open_angle: 0,
            vent_close_angle: 95,

            // Timing
            poll_interval_ms: 5000,

            // Data log
            logging_enabled: false,
            log_path: String::from(crate::datalog::DEFAULT_LOG_PATH),
        }
    }
}

impl IncubatorConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    ///
    /// `min < target < max` keeps the heater and cooler start conditions
    /// disjoint.  Exclusion itself comes from the supervisor, which releases
    /// one device before starting the other on every path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_temp_c.is_finite()
            && self.max_temp_c.is_finite()
            && self.target_temp_c.is_finite())
        {
            return Err(ConfigError::ValidationFailed("temperatures must be finite"));
        }
        if self.min_temp_c >= self.target_temp_c {
            return Err(ConfigError::ValidationFailed("min_temp_c must be below target_temp_c"));
        }
        if self.target_temp_c >= self.max_temp_c {
            return Err(ConfigError::ValidationFailed("target_temp_c must be below max_temp_c"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be non-zero"));
        }
        if self.heater_on_secs == 0 || self.heater_off_secs == 0 {
            return Err(ConfigError::ValidationFailed("heater durations must be non-zero"));
        }
        if self.vent_open_angle > 180 || self.vent_close_angle > 180 {
            return Err(ConfigError::ValidationFailed("vent angles must be 0..=180"));
        }
        if self.logging_enabled && self.log_path.is_empty() {
            return Err(ConfigError::ValidationFailed("log_path must be set when logging"));
        }
        Ok(())
    }
}
