//! Relay-driven actuators.
//!
//! Every output on the board is an active-low relay.  The drivers here only
//! track and drive their outputs; all decisions are made in `control` and
//! `app`.

pub mod fan;
pub mod relay;
pub mod vent;
