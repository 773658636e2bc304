//! GPIO / peripheral pin assignments for the incubator board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  All relays are active-low (HIGH = released).

// ---------------------------------------------------------------------------
// Fan relays
// ---------------------------------------------------------------------------

/// Selects the fan supply voltage.  HIGH = slow (safe default), LOW = fast.
pub const FAN_MODE_GPIO: u8 = 0;
/// Switches the fan supply.  HIGH = off, LOW = on.
pub const FAN_GPIO: u8 = 1;

// ---------------------------------------------------------------------------
// Vent (hatch)
// ---------------------------------------------------------------------------

/// Servo supply relay, pulsed only while the vent moves.
pub const VENT_RELAY_GPIO: u8 = 2;
/// Servo signal pin.
pub const VENT_SERVO_GPIO: u8 = 28;

// ---------------------------------------------------------------------------
// Heater
// ---------------------------------------------------------------------------

/// Heating element relay.  HIGH = off, LOW = heating.
pub const HEATER_GPIO: u8 = 3;
