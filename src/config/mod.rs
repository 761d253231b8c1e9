//! Configuration module for sentinel-win
//!
//! There is no configuration file by design. This module concentrates the
//! in-memory description of the supervised target that startup hands to
//! the control loop.

pub mod watchdog;

pub use watchdog::{ConfigError, WatchdogConfig};
