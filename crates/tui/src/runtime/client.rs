//! Hub client creation.
//!
//! Responsibilities:
//! - Build the shared hub client from loaded configuration.
//!
//! Does NOT handle:
//! - Configuration loading (see `runtime::config`).
//! - Any request; the client is only constructed here.

use std::sync::Arc;

use anyhow::{Context, Result};
use hub_client::HubClient;
use hub_config::Config;

use crate::runtime::side_effects::SharedClient;

/// Create the hub client shared by all side effects and listeners.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built from `config`.
pub fn create_client(config: &Config) -> Result<SharedClient> {
    let client = HubClient::builder()
        .from_config(config)
        .build()
        .context("Failed to create hub client")?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_user() {
        let config = Config::with_token(
            "https://hub.example.org/hub/".to_string(),
            "alice".to_string(),
            "secret".to_string(),
        );
        let client = create_client(&config).expect("client");
        assert_eq!(client.user(), "alice");
        assert_eq!(client.base_url(), "https://hub.example.org/hub");
    }
}
