//! User and named-server models returned by `GET api/users/{user}`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::options::UserOptions;

/// A hub user with their named servers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserModel {
    pub name: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Named servers keyed by server name. The default server has an empty name.
    #[serde(default)]
    pub servers: BTreeMap<String, ServerModel>,
}

/// One named server as reported by the hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ready: bool,
    /// `"spawn"` or `"stop"` while an action is in progress.
    #[serde(default)]
    pub pending: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub progress_url: Option<String>,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_options: UserOptions,
}

impl ServerModel {
    /// Whether the server is running or on its way up.
    pub fn is_running(&self) -> bool {
        self.ready || self.pending.as_deref() == Some("spawn")
    }

    pub fn is_spawn_pending(&self) -> bool {
        self.pending.as_deref() == Some("spawn")
    }
}

/// Reason recorded by the hub when a pending spawn is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_error: Option<String>,
}
