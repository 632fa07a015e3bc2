//! Main hub REST API client and API methods.
//!
//! This module provides the primary [`HubClient`] for managing one user's
//! named servers on a hub.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `servers`: Named-server lifecycle methods
//! - `events`: Progress and notification event streams
//! - `logging`: Logging handler administration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retrying failed calls; every retry is a new user gesture
//!
//! # Invariants
//! - `base_url` has no trailing slash and includes the hub prefix (e.g. `/hub`)
//! - Every request authenticates with `Authorization: token <secret>`

pub mod builder;

mod events;
mod logging;
mod servers;

use secrecy::SecretString;

use crate::endpoints;

/// Hub REST API client scoped to one user.
///
/// ```rust,ignore
/// use hub_client::HubClient;
/// use secrecy::SecretString;
///
/// let client = HubClient::builder()
///     .base_url("https://hub.example.org/hub".to_string())
///     .user("alice".to_string())
///     .token(SecretString::new("my-token".to_string().into()))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct HubClient {
    pub(crate) http: reqwest::Client,
    /// Client without an overall timeout, for long-lived event streams.
    pub(crate) stream_http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) user: String,
    pub(crate) token: SecretString,
}

impl HubClient {
    /// Create a new client builder.
    pub fn builder() -> builder::HubClientBuilder {
        builder::HubClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The user whose servers this client manages.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Browser URL of the spawn page for `name`, with a prepared query string.
    ///
    /// `query` is appended verbatim after `?`; an empty query adds nothing.
    pub fn spawn_url(&self, name: &str, query: &str) -> String {
        endpoints::spawn_url(&self.base_url, &self.user, name, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn client(base_url: &str) -> HubClient {
        HubClient::builder()
            .base_url(base_url.to_string())
            .user("alice".to_string())
            .token(SecretString::new("test-token".to_string().into()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_builder_normalizes_base_url() {
        assert_eq!(
            client("https://hub.example.org/hub/").base_url(),
            "https://hub.example.org/hub"
        );
    }

    #[test]
    fn test_client_builder_missing_base_url() {
        let result = HubClient::builder()
            .user("alice".to_string())
            .token(SecretString::new("t".to_string().into()))
            .build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_client_builder_missing_token() {
        let result = HubClient::builder()
            .base_url("https://hub.example.org/hub".to_string())
            .user("alice".to_string())
            .build();
        assert!(matches!(result, Err(ClientError::AuthFailed(_))));
    }

    #[test]
    fn test_spawn_url() {
        let client = client("https://hub.example.org/hub");
        assert_eq!(
            client.spawn_url("lab1", "vo_active_input=myvo&service_input=JupyterLab"),
            "https://hub.example.org/hub/spawn/alice/lab1?vo_active_input=myvo&service_input=JupyterLab"
        );
        assert_eq!(
            client.spawn_url("my lab", ""),
            "https://hub.example.org/hub/spawn/alice/my%20lab"
        );
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let debug = format!("{:?}", client("https://hub.example.org/hub"));
        assert!(!debug.contains("test-token"));
    }
}
