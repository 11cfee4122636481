//! Path helpers for the roots file location.
//!
//! Responsibilities:
//! - Determine the platform-appropriate default roots file path.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_ROOTS_FILE};

/// Returns the default location of the roots file.
///
/// - Linux: `~/.config/multiroot/roots.conf`
/// - macOS: `~/Library/Application Support/multiroot/roots.conf`
/// - Windows: `%AppData%\multiroot\config\roots.conf`
///
/// Returns `None` when no home directory can be determined.
pub fn default_roots_path() -> Option<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Some(proj_dirs.config_dir().join(DEFAULT_ROOTS_FILE))
}
