//! Session scope settings: which VO is active and which systems are usable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-session settings that shape the server list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Active virtual organization, sent as `vo_active_input`.
    pub vo: Option<String>,
    /// Systems the user may currently spawn on. `None` means every system is available.
    pub available_systems: Option<Vec<String>>,
    /// Override for the persisted UI state file.
    pub state_path: Option<PathBuf>,
    /// Service whose log handlers the logging screen manages.
    pub log_service: Option<String>,
}

impl SessionConfig {
    /// Whether a server configured for `system` can be started in this session.
    ///
    /// Servers without a system are always considered available.
    pub fn is_system_available(&self, system: Option<&str>) -> bool {
        match (&self.available_systems, system) {
            (Some(systems), Some(system)) => systems.iter().any(|s| s == system),
            _ => true,
        }
    }
}
