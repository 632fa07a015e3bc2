//! Event stream methods for [`HubClient`].

use secrecy::ExposeSecret;

use crate::client::HubClient;
use crate::endpoints;
use crate::error::Result;
use crate::sse::EventStream;

impl HubClient {
    /// Open the progress stream of `name`.
    pub async fn progress_stream(&self, name: &str) -> Result<EventStream> {
        endpoints::progress_stream(
            &self.stream_http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
            name,
        )
        .await
    }

    /// Open the pending-spawner notification stream.
    pub async fn pending_spawners_stream(&self) -> Result<EventStream> {
        endpoints::pending_spawners_stream(
            &self.stream_http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
        )
        .await
    }

    /// Open the stop notification stream.
    pub async fn stop_notifications_stream(&self) -> Result<EventStream> {
        endpoints::stop_notifications_stream(
            &self.stream_http,
            &self.base_url,
            self.token.expose_secret(),
            &self.user,
        )
        .await
    }
}
