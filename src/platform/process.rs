//! Process discovery and launch for the supervised application
//!
//! This module handles:
//! - Probing the live process table for the target executable
//! - Launching the target with its first window already minimized
//! - Raising the watchdog's own scheduling priority
//!
//! The probe takes a fresh Toolhelp snapshot every call; nothing about the
//! process table is cached between ticks.

use crate::platform::wide::{from_wide_buf, to_wide};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
use windows::Win32::System::Threading::{
    CreateProcessW, GetCurrentProcess, HIGH_PRIORITY_CLASS, PROCESS_CREATION_FLAGS,
    PROCESS_INFORMATION, STARTF_USESHOWWINDOW, STARTUPINFOW, SetPriorityClass,
};
use windows::Win32::UI::WindowsAndMessaging::SW_MINIMIZE;
use windows::core::{PCWSTR, PWSTR};

/// Error types for process operations
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to snapshot the process table")]
    SnapshotFailed(#[source] windows::core::Error),

    #[error("Failed to launch {path}")]
    LaunchFailed {
        path: String,
        #[source]
        source: windows::core::Error,
    },

    #[error("Failed to raise process priority")]
    PriorityFailed(#[source] windows::core::Error),
}

/// Toolhelp snapshot handle, closed on every exit path.
struct SnapshotHandle(HANDLE);

impl Drop for SnapshotHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Case-insensitive exact match between a process-table entry and the
/// configured executable name. Substring matches do not count.
fn name_matches(entry_name: &str, target: &str) -> bool {
    entry_name.to_lowercase() == target.to_lowercase()
}

/// Looks up the target executable in the process table.
///
/// # Returns
/// `Some(pid)` of the first matching entry, `None` when the target is not
/// running.
pub fn find_process_id(name: &str) -> Result<Option<u32>, ProcessError> {
    unsafe {
        let snapshot = SnapshotHandle(
            CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
                .map_err(ProcessError::SnapshotFailed)?,
        );

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        if Process32FirstW(snapshot.0, &mut entry).is_err() {
            return Ok(None);
        }

        loop {
            let exe_name = from_wide_buf(&entry.szExeFile);
            if name_matches(&exe_name, name) {
                return Ok(Some(entry.th32ProcessID));
            }
            if Process32NextW(snapshot.0, &mut entry).is_err() {
                return Ok(None);
            }
        }
    }
}

/// Launches the target executable with its first window minimized.
///
/// `STARTF_USESHOWWINDOW` + `SW_MINIMIZE` makes the application come up
/// minimized while keeping its taskbar entry. The child is detached: both
/// returned handles are closed immediately and the child is never waited on.
///
/// # Returns
/// The child's pid, for logging only.
pub fn launch_minimized(path: &str) -> Result<u32, ProcessError> {
    let wide_path = to_wide(path);

    let startup = STARTUPINFOW {
        cb: std::mem::size_of::<STARTUPINFOW>() as u32,
        dwFlags: STARTF_USESHOWWINDOW,
        wShowWindow: SW_MINIMIZE.0 as u16,
        ..Default::default()
    };
    let mut process_info = PROCESS_INFORMATION::default();

    unsafe {
        CreateProcessW(
            PCWSTR(wide_path.as_ptr()),
            PWSTR::null(),
            None,
            None,
            false,
            PROCESS_CREATION_FLAGS(0),
            None,
            PCWSTR::null(),
            &startup,
            &mut process_info,
        )
        .map_err(|source| ProcessError::LaunchFailed {
            path: path.to_string(),
            source,
        })?;

        let _ = CloseHandle(process_info.hProcess);
        let _ = CloseHandle(process_info.hThread);
    }

    Ok(process_info.dwProcessId)
}

/// Raises the watchdog's own priority class so enforcement keeps running
/// on a loaded desktop.
///
/// `GetCurrentProcess` returns a pseudo-handle that needs no close.
pub fn raise_own_priority() -> Result<(), ProcessError> {
    unsafe {
        SetPriorityClass(GetCurrentProcess(), HIGH_PRIORITY_CLASS)
            .map_err(ProcessError::PriorityFailed)
    }
}
