//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClimateSupervisor (domain)
//! ```
//!
//! Driven adapters (sensor, clock, servo, display, log storage, event sinks)
//! implement these traits.  Relay outputs and the settle delay use the
//! `embedded-hal` traits directly, so any HAL pin can drive a relay.

use core::fmt;

use crate::config::IncubatorConfig;
use crate::error::{ActuatorError, StorageError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the chamber climate sensor.
///
/// Readings are assumed to always be available; a driver that fails
/// internally should return its last good value.
pub trait SensorPort {
    /// Chamber temperature in °C.
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in %.
    fn read_humidity(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; consumers must use
/// wrapping arithmetic on differences.
pub trait ClockPort {
    fn now_millis(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Servo port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Hobby-servo output, addressed by channel number.
pub trait ServoPort {
    /// Bind `channel` to the signal pin `pin`.
    fn attach(&mut self, channel: u8, pin: u8) -> Result<(), ActuatorError>;

    /// Command the servo on `channel` to `angle` degrees.
    fn write_angle(&mut self, channel: u8, angle: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Draw colour for [`DisplayPort::set_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black = 0,
    White = 1,
}

/// Monochrome status display (OLED-style primitives).
pub trait DisplayPort {
    type Error: fmt::Debug;

    fn set_font(&mut self, font: u8) -> Result<(), Self::Error>;

    fn write_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error>;

    fn set_color(&mut self, color: Color) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<(), Self::Error>;
}

// ───────────────────────────────────────────────────────────────
// Log storage port
// ───────────────────────────────────────────────────────────────

/// Line-oriented CSV storage (SD card on the target board).
pub trait LogStorePort {
    /// Create or truncate `path` and write `header` as its first line.
    fn create(&mut self, path: &str, header: &str) -> Result<(), StorageError>;

    /// Append `line` plus a line terminator to `path`.
    fn append_line(&mut self, path: &str, line: &str) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`IncubatorConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<IncubatorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &IncubatorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
