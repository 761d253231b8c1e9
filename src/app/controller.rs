//! Watchdog control loop
//!
//! The controller coordinates the three platform enforcements (volume,
//! process presence, window state) on a fixed polling cadence. Every tick
//! recomputes everything from live OS state; nothing carries over between
//! ticks except the stop flag.
//!
//! No tick outcome is fatal. Failures are logged and the next tick acts
//! as the retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::WatchdogConfig;
use crate::domain::tick::{EnforcementAction, plan_enforcement};
use crate::platform::{audio, process, window};

/// Granularity of stop-flag checks inside the longer waits.
const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Main watchdog controller
///
/// Owns the stable configuration and the shared stop flag. All work happens
/// on the caller's thread; the stop flag is the only cross-thread contact
/// point.
pub struct WatchdogController {
    config: WatchdogConfig,
    stop: Arc<AtomicBool>,
}

impl WatchdogController {
    pub fn new(config: WatchdogConfig, stop: Arc<AtomicBool>) -> Self {
        Self { config, stop }
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Runs enforcement ticks until the stop flag is set.
    pub fn run(&self) {
        info!(
            process = %self.config.process_name,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "Watchdog loop starting"
        );

        while !self.should_stop() {
            self.tick();
            self.wait(self.config.poll_interval);
        }

        info!("Watchdog loop stopped");
    }

    /// One enforcement pass: volume, then process presence, then window
    /// state. All three run unconditionally in that order.
    pub fn tick(&self) {
        if let Err(e) = audio::enforce_max_volume() {
            // An endpoint can appear or recover at any time; next tick retries.
            warn!("Volume enforcement failed: {e}");
        }

        let pid = match process::find_process_id(&self.config.process_name) {
            Ok(pid) => pid,
            Err(e) => {
                warn!("Process probe failed: {e}");
                return;
            }
        };

        match plan_enforcement(pid) {
            EnforcementAction::EnsureMinimized => self.enforce_window_state(),
            EnforcementAction::LaunchMinimized => self.launch_and_settle(),
        }
    }

    fn enforce_window_state(&self) {
        match window::minimize_by_caption(&self.config.window_caption) {
            Ok(()) => debug!("Window minimized"),
            Err(window::WindowError::NotFound { .. }) => {
                // Expected while the application is still creating its window
                debug!(
                    caption = %self.config.window_caption,
                    "Window not present yet"
                );
            }
            Err(e) => warn!("Window enforcement failed: {e}"),
        }
    }

    fn launch_and_settle(&self) {
        info!(
            path = %self.config.executable_path,
            "Target not running, launching minimized"
        );
        match process::launch_minimized(&self.config.executable_path) {
            Ok(pid) => {
                info!(pid, "Launched, waiting for initialization");
                self.wait(self.config.settle_delay);
                self.enforce_window_state();
            }
            Err(e) => warn!("Launch failed: {e}"),
        }
    }

    /// Sleeps for the given duration in slices, so a stop request
    /// interrupts even the settle delay within one slice.
    fn wait(&self, total: Duration) {
        let deadline = Instant::now() + total;
        while !self.should_stop() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(WAIT_SLICE));
        }
    }
}
