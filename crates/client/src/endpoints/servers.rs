//! Named-server endpoints.
//!
//! Responsibilities:
//! - Start, stop, cancel, delete and reconfigure one named server.
//! - Read the user model and a server's progress status.
//!
//! Does NOT handle:
//! - Progress and notification event streams (see events.rs).
//! - Deciding which request a gesture maps to (see the TUI crate).

use reqwest::Client;
use serde_json::json;

use crate::endpoints::{encode_path_segment, url_path_join};
use crate::endpoints::send_request;
use crate::error::Result;
use crate::models::{CancelReason, ProgressStatus, UserModel, UserOptions};

fn server_url(base_url: &str, user: &str, name: &str) -> String {
    format!(
        "{}/api/users/{}/servers/{}",
        base_url,
        encode_path_segment(user),
        encode_path_segment(name)
    )
}

fn auth_header(auth_token: &str) -> String {
    format!("token {}", auth_token)
}

/// Browser URL of the spawn page for `name`, with a prepared query string.
///
/// `query` is appended verbatim after `?`; an empty query adds nothing.
pub fn spawn_url(base_url: &str, user: &str, name: &str, query: &str) -> String {
    let path = url_path_join(
        base_url,
        &["spawn", &encode_path_segment(user), &encode_path_segment(name)],
    );
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

/// Get a user and their named servers.
pub async fn get_user(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
) -> Result<UserModel> {
    let url = format!("{}/api/users/{}", base_url, encode_path_segment(user));
    let builder = client.get(&url).header("Authorization", auth_header(auth_token));
    let response = send_request(builder, "/api/users/{user}", "GET").await?;
    Ok(response.json().await?)
}

/// Request a spawn of `name` with the given option set.
pub async fn start_server(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
    options: &UserOptions,
) -> Result<()> {
    let builder = client
        .post(server_url(base_url, user, name))
        .header("Authorization", auth_header(auth_token))
        .json(options);
    send_request(builder, "/api/users/{user}/servers/{name}", "POST").await?;
    Ok(())
}

/// Stop a running server, keeping it in the server list.
pub async fn stop_server(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
) -> Result<()> {
    let builder = client
        .delete(server_url(base_url, user, name))
        .header("Authorization", auth_header(auth_token));
    send_request(builder, "/api/users/{user}/servers/{name}", "DELETE").await?;
    Ok(())
}

/// Stop a server if needed and remove it permanently.
pub async fn delete_server(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
) -> Result<()> {
    let builder = client
        .delete(server_url(base_url, user, name))
        .header("Authorization", auth_header(auth_token))
        .json(&json!({ "remove": true }));
    send_request(builder, "/api/users/{user}/servers/{name}", "DELETE").await?;
    Ok(())
}

/// Cancel a pending spawn.
pub async fn cancel_server(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
    reason: Option<&CancelReason>,
) -> Result<()> {
    let url = format!("{}/cancel", server_url(base_url, user, name));
    let mut builder = client
        .post(&url)
        .header("Authorization", auth_header(auth_token));
    if let Some(reason) = reason {
        builder = builder.json(reason);
    }
    send_request(builder, "/api/users/{user}/servers/{name}/cancel", "POST").await?;
    Ok(())
}

/// Replace the stored option set of a server without starting it.
pub async fn update_server_options(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
    options: &UserOptions,
) -> Result<()> {
    let url = format!("{}/options", server_url(base_url, user, name));
    let builder = client
        .post(&url)
        .header("Authorization", auth_header(auth_token))
        .json(options);
    send_request(builder, "/api/users/{user}/servers/{name}/options", "POST").await?;
    Ok(())
}

/// Snapshot of a server's spawn progress.
pub async fn progress_status(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    user: &str,
    name: &str,
) -> Result<ProgressStatus> {
    let url = format!(
        "{}/api/users/progress/status/{}/{}",
        base_url,
        encode_path_segment(user),
        encode_path_segment(name)
    );
    let builder = client.get(&url).header("Authorization", auth_header(auth_token));
    let response = send_request(builder, "/api/users/progress/status/{user}/{name}", "GET").await?;
    Ok(response.json().await?)
}
