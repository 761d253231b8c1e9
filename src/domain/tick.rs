//! Per-tick enforcement planning
//!
//! Pure decision logic for the control loop, independent of Win32 APIs.
//! The loop probes the OS, this module decides what the probe result
//! demands, and the loop carries the action out.

/// Action the control loop must take for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnforcementAction {
    /// Target is running; force its window back into minimized state.
    EnsureMinimized,
    /// Target is absent; launch it minimized, then enforce window state
    /// after the settle delay.
    LaunchMinimized,
}

/// Maps a fresh process probe onto the tick's action.
///
/// The probe result is never cached; callers look the pid up again on the
/// next tick.
pub fn plan_enforcement(pid: Option<u32>) -> EnforcementAction {
    match pid {
        Some(_) => EnforcementAction::EnsureMinimized,
        None => EnforcementAction::LaunchMinimized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_target_gets_reminimized() {
        assert_eq!(
            plan_enforcement(Some(4242)),
            EnforcementAction::EnsureMinimized
        );
    }

    #[test]
    fn absent_target_gets_launched() {
        assert_eq!(plan_enforcement(None), EnforcementAction::LaunchMinimized);
    }

    #[test]
    fn any_live_pid_counts_as_running() {
        // The pid value itself carries no meaning beyond presence
        assert_eq!(
            plan_enforcement(Some(u32::MAX)),
            EnforcementAction::EnsureMinimized
        );
    }
}
