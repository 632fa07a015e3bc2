//! Connection configuration types for the hub TUI.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout).
//! - Define the main `Config` structure combining connection, auth and session scope.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `base_url` never carries a trailing slash once built by the loader.

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::types::auth::AuthConfig;
use crate::types::session::SessionConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the hub including its prefix (e.g., https://hub.example.org/hub)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/hub".to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    /// Hub user whose named servers are managed.
    pub user: String,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Create a config for the given user and token with default connection settings.
    pub fn with_token(base_url: String, user: String, token: String) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::default()
            },
            auth: AuthConfig {
                token: SecretString::new(token.into()),
            },
            user,
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_serialized_as_seconds() {
        let config = ConnectionConfig {
            timeout: Duration::from_secs(45),
            ..ConnectionConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], 45);
    }

    #[test]
    fn test_with_token_uses_defaults() {
        let config = Config::with_token(
            "https://hub.example.org/hub".to_string(),
            "alice".to_string(),
            "tok".to_string(),
        );
        assert_eq!(config.connection.base_url, "https://hub.example.org/hub");
        assert_eq!(config.user, "alice");
        assert!(!config.connection.skip_verify);
        assert_eq!(
            config.connection.timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert!(config.session.vo.is_none());
    }
}
