//! Persistence for display preferences.
//!
//! Responsibilities:
//! - Determine the platform location of the UI state file.
//! - Read and write the open-panel lists (`PersistedState`) to disk.
//! - Back up corrupt state files instead of failing startup.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Direct REST API communication (see `crates/client`).
//!
//! Invariants:
//! - Writes are atomic (temp file + rename).
//! - A missing or corrupt file yields the default state; corrupt files are renamed, never deleted.
//! - This state is display preference only; losing it never affects server operations.

use std::path::{Path, PathBuf};

mod path;
mod state;
mod store;

pub use path::default_state_path;
pub use state::{PersistedState, TabPage};
pub use store::StateStore;

/// Creates a backup of a corrupt state file before it is overwritten.
///
/// The file is renamed to a path with a `.corrupt.{timestamp}` extension so
/// the contents stay available for inspection.
pub(crate) fn create_corrupt_backup(path: &Path) -> Result<PathBuf, std::io::Error> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let backup_path = path.with_extension(format!("corrupt.{}", timestamp));

    std::fs::rename(path, &backup_path)?;

    Ok(backup_path)
}
