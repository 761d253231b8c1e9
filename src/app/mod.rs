//! Application orchestration layer
//!
//! This module coordinates the platform enforcements from the polling
//! control loop.

pub mod controller;

pub use controller::WatchdogController;
