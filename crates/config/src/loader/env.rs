//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `HUB_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Split a comma-separated list, dropping empty entries.
pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("HUB_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(user) = env_var_or_none("HUB_USER") {
        loader.set_user(Some(user));
    }
    if let Some(token) = env_var_or_none("HUB_API_TOKEN") {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = env_var_or_none("HUB_SKIP_VERIFY") {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: "HUB_SKIP_VERIFY".to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    if let Some(timeout) = env_var_or_none("HUB_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "HUB_TIMEOUT".to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(vo) = env_var_or_none("HUB_VO") {
        loader.set_vo(Some(vo));
    }
    if let Some(systems) = env_var_or_none("HUB_SYSTEMS") {
        loader.set_available_systems(Some(parse_list(&systems)));
    }
    if let Some(path) = env_var_or_none("HUB_STATE_PATH") {
        loader.set_state_path(Some(PathBuf::from(path)));
    }
    if let Some(service) = env_var_or_none("HUB_LOG_SERVICE") {
        loader.set_log_service(Some(service));
    }

    Ok(())
}
