//! Named-server API methods for [`HubClient`].
//!
//! # What this module handles:
//! - Reading the user's servers
//! - Start, stop, cancel, delete and option updates of one named server
//! - Progress status snapshots
//!
//! # What this module does NOT handle:
//! - Event streams (in `events`)
//! - Low-level HTTP calls (in [`crate::endpoints::servers`])

use secrecy::ExposeSecret;

use crate::client::HubClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{CancelReason, ProgressStatus, UserModel, UserOptions};

impl HubClient {
    /// Get the user model including all named servers.
    pub async fn get_user(&self) -> Result<UserModel> {
        endpoints::get_user(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
        )
        .await
    }

    /// Request a spawn of `name`.
    pub async fn start_server(&self, name: &str, options: &UserOptions) -> Result<()> {
        endpoints::start_server(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
            options,
        )
        .await
    }

    /// Stop `name` without removing it.
    pub async fn stop_server(&self, name: &str) -> Result<()> {
        endpoints::stop_server(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
        )
            .await
    }

    /// Stop and remove `name`.
    pub async fn delete_server(&self, name: &str) -> Result<()> {
        endpoints::delete_server(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
        )
            .await
    }

    /// Cancel a pending spawn of `name`.
    pub async fn cancel_server(&self, name: &str, reason: Option<&CancelReason>) -> Result<()> {
        endpoints::cancel_server(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
            reason,
        )
        .await
    }

    /// Replace the stored options of `name`.
    pub async fn update_server_options(&self, name: &str, options: &UserOptions) -> Result<()> {
        endpoints::update_server_options(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
            options,
        )
        .await
    }

    /// Current progress of `name`, including the events seen so far.
    pub async fn progress_status(&self, name: &str) -> Result<ProgressStatus> {
        endpoints::progress_status(
            &self.http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
        )
            .await
    }
}
