//! Client builder for constructing [`HubClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, user, token)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP clients (timeouts, TLS verification)
//!
//! # Invariants
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning
//! - The stream client only bounds connection setup, never the body

use std::time::Duration;

use hub_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
};
use secrecy::SecretString;

use crate::client::HubClient;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`HubClient`].
pub struct HubClientBuilder {
    base_url: Option<String>,
    user: Option<String>,
    token: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
}

impl Default for HubClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            user: None,
            token: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HubClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the hub, including its prefix, e.g. `https://hub.example.org/hub`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the user whose servers are managed.
    pub fn user(mut self, user: String) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the API token.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.user = Some(config.user.clone());
        self.token = Some(config.auth.token.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    fn http_builder(&self, is_https: bool) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));
        if self.skip_verify && is_https {
            builder = builder.danger_accept_invalid_certs(true);
        }
        builder
    }

    /// Build the [`HubClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` or `user` was not provided.
    /// Returns [`ClientError::AuthFailed`] if `token` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<HubClient> {
        let base_url = self
            .base_url
            .clone()
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let user = self
            .user
            .clone()
            .ok_or_else(|| ClientError::InvalidUrl("user is required".to_string()))?;

        let token = self
            .token
            .clone()
            .ok_or_else(|| ClientError::AuthFailed("token is required".to_string()))?;

        let is_https = base_url.starts_with("https://");
        if self.skip_verify && !is_https {
            tracing::warn!(
                "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
            );
        }

        let http = self.http_builder(is_https).timeout(self.timeout).build()?;
        let stream_http = self
            .http_builder(is_https)
            .connect_timeout(self.timeout)
            .build()?;

        Ok(HubClient {
            http,
            stream_http,
            base_url,
            user,
            token,
        })
    }
}
