//! sentinel-win
//!
//! Watchdog that keeps the school intercom application running, minimized
//! to the taskbar, and the system output at full volume and unmuted. One
//! fixed-cadence loop re-asserts all three from live OS state every tick.

mod app;
mod config;
mod domain;
mod platform;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::WatchdogController;
use crate::config::WatchdogConfig;

fn main() {
    // Initialize logging with RUST_LOG env var support
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("sentinel-win starting (pid: {})", std::process::id());

    let config = WatchdogConfig::default();
    if let Err(e) = config.validate() {
        // Defaults are compiled in; this only trips if they are edited badly
        error!("Invalid watchdog configuration: {e}");
        std::process::exit(1);
    }

    // Ctrl+C flips the shared stop flag; the loop notices within one slice
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            info!("Received Ctrl+C");
            stop.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    // Keep enforcement responsive even on a loaded desktop
    if let Err(e) = platform::process::raise_own_priority() {
        warn!("Could not raise process priority: {e}");
    }

    WatchdogController::new(config, stop).run();

    info!("sentinel-win stopped");
}
