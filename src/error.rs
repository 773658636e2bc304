//! Unified error types for the incubator controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! supervisor's reporting uniform.  All variants are `Copy` so they can be
//! handed to the event sink without allocation.
//!
//! None of these errors alter control flow: the supervisor reports them
//! and carries on with the next poll cycle.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible hardware or storage operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A relay or servo command failed.
    Actuator(ActuatorError),
    /// The CSV log could not be written.
    Storage(StorageError),
    /// The status display rejected a draw call.
    Display,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Display => write!(f, "display write failed"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
    /// Servo channel could not be attached to its pin.
    ServoAttachFailed,
    /// Servo angle write failed.
    ServoWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::ServoAttachFailed => write!(f, "servo attach failed"),
            Self::ServoWriteFailed => write!(f, "servo write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Card or filesystem not available.
    NotMounted,
    /// Generic I/O error from the storage backend.
    IoError,
    /// A record did not fit the fixed-capacity line buffer.
    LineTooLong,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMounted => write!(f, "storage not mounted"),
            Self::IoError => write!(f, "I/O error"),
            Self::LineTooLong => write!(f, "record too long"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Keep the first error of a sequence of independent hardware steps.
///
/// Every step has already run by the time this is called; only the
/// reporting is collapsed.
pub fn first_error<const N: usize>(results: [Result<()>; N]) -> Result<()> {
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}
