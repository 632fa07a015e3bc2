//! Logging handler endpoints (`api/logs/{service}/handler`).

use reqwest::Client;

use crate::endpoints::{encode_path_segment, send_request};
use crate::error::Result;
use crate::models::{HandlerKind, HandlerListResponse, LogHandler};

fn handlers_url(base_url: &str, service: &str) -> String {
    format!("{}/api/logs/{}/handler/", base_url, encode_path_segment(service))
}

fn handler_url(base_url: &str, service: &str, kind: HandlerKind) -> String {
    format!("{}{}", handlers_url(base_url, service), kind.as_str())
}

/// List the configured handlers of a service.
pub async fn list_log_handlers(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    service: &str,
) -> Result<Vec<LogHandler>> {
    let builder = client
        .get(handlers_url(base_url, service))
        .header("Authorization", format!("token {}", auth_token));
    let response = send_request(builder, "/api/logs/{service}/handler/", "GET").await?;
    let resp: HandlerListResponse = response.json().await?;
    Ok(resp.into_handlers())
}

/// Get one handler's configuration.
pub async fn get_log_handler(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    service: &str,
    kind: HandlerKind,
) -> Result<LogHandler> {
    let builder = client
        .get(handler_url(base_url, service, kind))
        .header("Authorization", format!("token {}", auth_token));
    let response = send_request(builder, "/api/logs/{service}/handler/{handler}", "GET").await?;
    Ok(response.json().await?)
}

/// Create a handler that does not exist yet.
pub async fn create_log_handler(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    service: &str,
    handler: &LogHandler,
) -> Result<()> {
    let builder = client
        .post(handlers_url(base_url, service))
        .header("Authorization", format!("token {}", auth_token))
        .json(handler);
    send_request(builder, "/api/logs/{service}/handler/", "POST").await?;
    Ok(())
}

/// Merge new settings into an existing handler.
pub async fn update_log_handler(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    service: &str,
    handler: &LogHandler,
) -> Result<()> {
    let builder = client
        .patch(handler_url(base_url, service, handler.handler))
        .header("Authorization", format!("token {}", auth_token))
        .json(handler);
    send_request(builder, "/api/logs/{service}/handler/{handler}", "PATCH").await?;
    Ok(())
}

/// Remove a handler.
pub async fn delete_log_handler(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    service: &str,
    kind: HandlerKind,
) -> Result<()> {
    let builder = client
        .delete(handler_url(base_url, service, kind))
        .header("Authorization", format!("token {}", auth_token));
    send_request(builder, "/api/logs/{service}/handler/{handler}", "DELETE").await?;
    Ok(())
}
