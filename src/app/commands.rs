//! Inbound device commands.
//!
//! Every device answers to a small set of symbolic actions, e.g.
//! `"heater on"`, `"vent close"`, `"fan-mode fast"`.  A device name on its
//! own asks for a snapshot of its attributes.  Unknown names and actions
//! supported by no device fail at parse time; a known action sent to a
//! device that does not implement it fails in
//! [`ClimateSupervisor::handle_command`](super::service::ClimateSupervisor::handle_command).
//! Neither case touches hardware.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::control::cooler::CoolerSnapshot;
use crate::control::heater::HeaterSnapshot;
use crate::drivers::fan::{FanSnapshot, FanSpeedSnapshot};
use crate::drivers::vent::VentSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Device {
    FanMode,
    Fan,
    Vent,
    Heater,
    Cooler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action: return the device snapshot.
    Status,
    Init,
    On,
    Off,
    Slow,
    Fast,
    Open,
    Close,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCommand {
    pub device: Device,
    pub action: Action,
}

impl DeviceCommand {
    pub fn new(device: Device, action: Action) -> Self {
        Self { device, action }
    }

    /// Whether `device` implements `action`.
    pub fn is_supported(&self) -> bool {
        use Action::*;
        match self.device {
            Device::FanMode => matches!(self.action, Status | Init | Slow | Fast),
            Device::Fan => matches!(self.action, Status | Init | On | Off),
            Device::Vent => matches!(self.action, Status | Init | Open | Close),
            Device::Heater => matches!(self.action, Status | Init | On | Off | Check),
            // The cooler has no relay of its own, so nothing to initialise.
            Device::Cooler => matches!(self.action, Status | On | Off | Check),
        }
    }
}

impl FromStr for Device {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fan-mode" | "fanmode" => Ok(Self::FanMode),
            "fan" => Ok(Self::Fan),
            "vent" | "hatch" => Ok(Self::Vent),
            "heater" => Ok(Self::Heater),
            "cooler" => Ok(Self::Cooler),
            _ => Err(CommandError::UnknownDevice),
        }
    }
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "init" => Ok(Self::Init),
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "slow" => Ok(Self::Slow),
            "fast" => Ok(Self::Fast),
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "check" => Ok(Self::Check),
            _ => Err(CommandError::UnknownAction),
        }
    }
}

impl FromStr for DeviceCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let device = words.next().ok_or(CommandError::Empty)?.parse()?;
        let action = match words.next() {
            Some(word) => word.parse()?,
            None => Action::Status,
        };
        if words.next().is_some() {
            return Err(CommandError::UnknownAction);
        }
        Ok(Self { device, action })
    }
}

/// Why a command was rejected.  Rejected commands have no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    UnknownDevice,
    UnknownAction,
    Unsupported(DeviceCommand),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownDevice => write!(f, "unknown device"),
            Self::UnknownAction => write!(f, "unknown action"),
            Self::Unsupported(cmd) => {
                write!(f, "{:?} does not support {:?}", cmd.device, cmd.action)
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Introspection snapshot of one device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "device", rename_all = "kebab-case")]
pub enum DeviceSnapshot {
    FanMode(FanSpeedSnapshot),
    Fan(FanSnapshot),
    Vent(VentSnapshot),
    Heater(HeaterSnapshot),
    Cooler(CoolerSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandResponse {
    Done,
    Snapshot(DeviceSnapshot),
}
