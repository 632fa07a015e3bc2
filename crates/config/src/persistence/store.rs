//! File-backed storage for `PersistedState`.
//!
//! Responsibilities:
//! - Load the state file, recovering from missing or corrupt files.
//! - Save atomically via a temporary file and rename.
//!
//! Invariants:
//! - Every save writes its own temporary file, so concurrent saves never
//!   interleave bytes; the last rename wins.
//!
//! Does NOT handle:
//! - Deciding which tabs are open (see state.rs).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use tracing::warn;

use super::path::default_state_path;
use super::state::PersistedState;
use super::create_corrupt_backup;
use crate::loader::ConfigError;

static SAVE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Reads and writes the UI state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform default location.
    pub fn default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(default_state_path()?))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// A missing file yields the default state. A file that cannot be parsed
    /// is renamed to `*.corrupt.<ts>` and the default state is returned.
    pub fn load(&self) -> PersistedState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return PersistedState::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read state file");
                return PersistedState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                match create_corrupt_backup(&self.path) {
                    Ok(backup) => warn!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "State file is corrupt; backed it up and starting fresh"
                    ),
                    Err(io) => warn!(
                        path = %self.path.display(),
                        error = %io,
                        "State file is corrupt and could not be backed up"
                    ),
                }
                PersistedState::default()
            }
        }
    }

    /// Save the state atomically.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let seq = SAVE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let temp_path = self
            .path
            .with_extension(format!("tmp.{}.{}", std::process::id(), seq));
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&temp_path, content).context("Failed to write temporary state file")?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e).context("Failed to replace state file");
        }

        Ok(())
    }
}
