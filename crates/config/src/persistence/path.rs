//! Path helpers for the persisted state file.
//!
//! Responsibilities:
//! - Determine the platform-appropriate state file path via `directories`.
//!
//! Does NOT handle:
//! - File I/O operations.

use std::path::PathBuf;

use crate::constants::{APP_NAME, STATE_FILE_NAME};
use crate::loader::ConfigError;

/// Returns the default path of the UI state file.
///
/// - Linux: `~/.config/hub-tui/state.json`
/// - macOS: `~/Library/Application Support/hub-tui/state.json`
/// - Windows: `%AppData%\hub-tui\config\state.json`
pub fn default_state_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for the current user".to_string())
    })?;

    Ok(proj_dirs.config_dir().join(STATE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_path_matches_project_dirs() {
        let expected = directories::ProjectDirs::from("", "", APP_NAME)
            .unwrap()
            .config_dir()
            .join(STATE_FILE_NAME);

        assert_eq!(default_state_path().unwrap(), expected);
    }
}
