//! Platform-specific Windows implementations
//!
//! This module encapsulates all Win32 and COM interactions and provides
//! a clean interface to the rest of the application.

pub mod audio;
pub mod process;
pub mod wide;
pub mod window;
