//! Logging handler administration for [`HubClient`].
//!
//! Create and update validate the handler locally first, so a request the
//! hub would reject with 400 is never sent.

use secrecy::ExposeSecret;

use crate::client::HubClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{HandlerKind, LogHandler};

impl HubClient {
    /// List handlers configured for `service`, ordered by kind.
    pub async fn list_log_handlers(&self, service: &str) -> Result<Vec<LogHandler>> {
        endpoints::list_log_handlers(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            service,
        )
            .await
    }

    /// Get one handler of `service`.
    pub async fn get_log_handler(&self, service: &str, kind: HandlerKind) -> Result<LogHandler> {
        endpoints::get_log_handler(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            service,
            kind,
        )
            .await
    }

    /// Create a handler on `service`.
    pub async fn create_log_handler(&self, service: &str, handler: &LogHandler) -> Result<()> {
        handler.validate()?;
        endpoints::create_log_handler(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            service,
            handler,
        )
        .await
    }

    /// Update an existing handler on `service`.
    pub async fn update_log_handler(&self, service: &str, handler: &LogHandler) -> Result<()> {
        handler.validate()?;
        endpoints::update_log_handler(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            service,
            handler,
        )
        .await
    }

    /// Remove a handler from `service`.
    pub async fn delete_log_handler(&self, service: &str, kind: HandlerKind) -> Result<()> {
        endpoints::delete_log_handler(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            service,
            kind,
        )
        .await
    }
}
