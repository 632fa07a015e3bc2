//! Spawn progress events and notification payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One event on a server's progress channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Percentage, 0-100.
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub html_message: Option<String>,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub ready: bool,
    /// Server URL, present on the final `ready` event.
    #[serde(default)]
    pub url: Option<String>,
}

impl ProgressEvent {
    /// Text to show in the progress log.
    pub fn display_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.html_message.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Progress clamped to 0-100.
    pub fn percent(&self) -> Option<u16> {
        self.progress.map(|p| p.min(100) as u16)
    }
}

/// Response of `GET api/users/progress/status/{user}/{server}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStatus {
    #[serde(default)]
    pub events: Vec<ProgressEvent>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub ready: bool,
}

/// Payload of the pending-spawner notification: server name to pending action.
pub type PendingSpawners = BTreeMap<String, Option<String>>;

/// Payload of the stop notification: server name to its last progress event.
pub type StopNotifications = BTreeMap<String, Option<ProgressEvent>>;
