use std::time::Duration;
use thiserror::Error;

/// Identity of the supervised application and the loop timing around it.
///
/// The watchdog takes no external configuration; these values are fixed at
/// startup. Keeping them in a value handed to the controller, rather than
/// constants read in place, lets tests substitute a harmless target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Executable name as it appears in the process table.
    pub process_name: String,
    /// Full path used to launch the application when it is not running.
    pub executable_path: String,
    /// Exact caption of the application's top-level window.
    pub window_caption: String,
    /// Delay between enforcement ticks.
    pub poll_interval: Duration,
    /// Wait after a launch before enforcing window state, so the
    /// application finishes creating its window first.
    pub settle_delay: Duration,
}

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Process name must not be empty")]
    EmptyProcessName,

    #[error("Executable path must not be empty")]
    EmptyExecutablePath,

    #[error("Window caption must not be empty")]
    EmptyWindowCaption,

    #[error("Poll interval must be non-zero")]
    ZeroPollInterval,
}

impl WatchdogConfig {
    pub const DEFAULT_PROCESS_NAME: &'static str = "nsptt_5.2.1.exe";
    pub const DEFAULT_EXECUTABLE_PATH: &'static str = "D:/nsptt_5.2.1.exe";
    pub const DEFAULT_WINDOW_CAPTION: &'static str = "南山对讲";
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(5000);

    /// Checks the invariants the control loop relies on. A zero settle
    /// delay is allowed (it only means the post-launch minimize runs
    /// immediately); a zero poll interval would turn the loop into a
    /// busy spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.process_name.is_empty() {
            return Err(ConfigError::EmptyProcessName);
        }
        if self.executable_path.is_empty() {
            return Err(ConfigError::EmptyExecutablePath);
        }
        if self.window_caption.is_empty() {
            return Err(ConfigError::EmptyWindowCaption);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            process_name: Self::DEFAULT_PROCESS_NAME.to_string(),
            executable_path: Self::DEFAULT_EXECUTABLE_PATH.to_string(),
            window_caption: Self::DEFAULT_WINDOW_CAPTION.to_string(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(WatchdogConfig::default().validate(), Ok(()));
    }

    #[test]
    fn defaults_describe_the_supervised_application() {
        let config = WatchdogConfig::default();
        assert_eq!(config.process_name, "nsptt_5.2.1.exe");
        assert_eq!(config.executable_path, "D:/nsptt_5.2.1.exe");
        assert_eq!(config.window_caption, "南山对讲");
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.settle_delay, Duration::from_millis(5000));
    }

    #[test]
    fn empty_identity_fields_are_rejected() {
        let mut config = WatchdogConfig::default();
        config.process_name.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyProcessName));

        let mut config = WatchdogConfig::default();
        config.executable_path.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyExecutablePath));

        let mut config = WatchdogConfig::default();
        config.window_caption.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyWindowCaption));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = WatchdogConfig {
            poll_interval: Duration::ZERO,
            ..WatchdogConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn zero_settle_delay_is_allowed() {
        let config = WatchdogConfig {
            settle_delay: Duration::ZERO,
            ..WatchdogConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
