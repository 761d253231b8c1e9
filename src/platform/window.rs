//! Window lookup and minimize enforcement
//!
//! This module handles:
//! - Finding the supervised application's top-level window by exact caption
//! - Forcing a window into minimized state while keeping its taskbar entry
//! - Querying whether a window is currently minimized
//!
//! Window handles are looked up fresh on every call and never cached; the
//! application can recreate its window at any time.

use crate::platform::wide::to_wide;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowW, IsIconic, IsWindow, SW_MINIMIZE, ShowWindow,
};
use windows::core::PCWSTR;

/// Error types for window operations
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("No top-level window titled {caption:?}")]
    NotFound { caption: String },

    #[error("Window handle {0:?} is no longer valid")]
    InvalidHandle(HWND),
}

/// Finds the first top-level window whose caption matches exactly.
pub fn find_by_caption(caption: &str) -> Result<HWND, WindowError> {
    let wide_caption = to_wide(caption);
    let hwnd = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(wide_caption.as_ptr())) };
    if hwnd.0 == 0 {
        return Err(WindowError::NotFound {
            caption: caption.to_string(),
        });
    }
    Ok(hwnd)
}

/// Commands a window into minimized state.
///
/// `SW_MINIMIZE` minimizes only: the window leaves the screen but its
/// taskbar entry stays visible and clickable. The window is never hidden
/// and never closed.
pub fn minimize(hwnd: HWND) -> Result<(), WindowError> {
    unsafe {
        if !IsWindow(hwnd).as_bool() {
            return Err(WindowError::InvalidHandle(hwnd));
        }
        // ShowWindow reports the previous visibility state, not failure.
        let _ = ShowWindow(hwnd, SW_MINIMIZE);
    }
    Ok(())
}

/// Finds the window with the given caption and minimizes it.
pub fn minimize_by_caption(caption: &str) -> Result<(), WindowError> {
    let hwnd = find_by_caption(caption)?;
    minimize(hwnd)
}

/// Returns true if the window is currently minimized (iconic).
pub fn is_minimized(hwnd: HWND) -> bool {
    unsafe { IsIconic(hwnd).as_bool() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_caption_reports_not_found() {
        let result = find_by_caption("sentinel-win test caption 7f2e (should not exist)");
        assert!(matches!(result, Err(WindowError::NotFound { .. })));
    }

    #[test]
    fn minimize_by_caption_propagates_not_found() {
        let result = minimize_by_caption("sentinel-win test caption 7f2e (should not exist)");
        assert!(matches!(result, Err(WindowError::NotFound { .. })));
    }

    #[test]
    fn minimize_rejects_stale_handles() {
        let stale = HWND(999_999);
        assert!(matches!(
            minimize(stale),
            Err(WindowError::InvalidHandle(_))
        ));
    }

    #[test]
    fn stale_handles_are_not_minimized() {
        assert!(!is_minimized(HWND(999_999)));
    }
}
