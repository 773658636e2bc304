//! Incubator climate controller library.
//!
//! Exposes the pure-logic core for integration testing and the host
//! simulation adapters used by the `incubator` binary.  Hardware access goes
//! through `embedded-hal` traits and the ports in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod datalog;
pub mod display;
pub mod drivers;
pub mod error;
pub mod pins;
