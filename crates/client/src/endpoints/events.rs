//! Event-stream endpoints.
//!
//! Each function opens the stream and returns it once the hub answered with a
//! success status; an error status is reported like any other request.

use reqwest::Client;

use crate::endpoints::{encode_path_segment, send_request};
use crate::error::Result;
use crate::sse::EventStream;

async fn open_stream(
    client: &Client,
    url: &str,
    auth_token: &str,
    endpoint: &str,
) -> Result<EventStream> {
    let builder = client
        .get(url)
        .header("Authorization", format!("token {}", auth_token))
        .header("Accept", "text/event-stream")
        .header("Cache-Control", "no-cache");
    let response = send_request(builder, endpoint, "GET").await?;
    Ok(EventStream::new(response))
}

/// Progress events of one named server.
pub async fn progress_stream(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
) -> Result<EventStream> {
    let url = format!(
        "{}/api/users/{}/servers/{}/progress",
        base_url,
        encode_path_segment(user),
        encode_path_segment(name)
    );
    open_stream(client, &url, auth_token, "/api/users/{user}/servers/{name}/progress").await
}

/// Names of servers that just entered a pending state.
pub async fn pending_spawners_stream(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
) -> Result<EventStream> {
    let url = format!(
        "{}/api/users/{}/notifications/spawners",
        base_url,
        encode_path_segment(user)
    );
    open_stream(client, &url, auth_token, "/api/users/{user}/notifications/spawners").await
}

/// Last event of servers that are being stopped.
pub async fn stop_notifications_stream(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
) -> Result<EventStream> {
    let url = format!(
        "{}/api/users/{}/notifications/spawners/stop",
        base_url,
        encode_path_segment(user)
    );
    open_stream(
        client,
        &url,
        auth_token,
        "/api/users/{user}/notifications/spawners/stop",
    )
    .await
}
