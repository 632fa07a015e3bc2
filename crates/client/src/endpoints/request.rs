//! Request helper that maps hub error responses to [`ClientError`].
//!
//! Responsibilities:
//! - Send a prepared `reqwest::RequestBuilder`.
//! - Turn any non-success status into `ClientError::ApiError` with a readable message.
//! - Log the request lifecycle at debug level.
//!
//! Does NOT handle:
//! - Retries. Every retry in this system is a new user gesture.
//! - Authentication headers (added by the endpoint functions).

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Error body shape returned by the hub (`{"status": 400, "message": "..."}`).
#[derive(Debug, Deserialize)]
struct HubErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Sends an HTTP request and returns the response if its status is a success.
///
/// # Errors
///
/// - `ClientError::HttpError` if the request could not be sent.
/// - `ClientError::ApiError` for any non-2xx status.
pub async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
) -> Result<Response> {
    debug!(endpoint, method, "Sending hub request");
    let response = builder.send().await?;
    let status = response.status();

    if status.is_success() {
        debug!(endpoint, method, status = status.as_u16(), "Hub request succeeded");
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    debug!(endpoint, method, status = status.as_u16(), %message, "Hub request failed");

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
    })
}

/// Pick the most useful message: the JSON `message`/`error` field, then a
/// short plain-text body, then the canonical reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<HubErrorBody>(body)
        && let Some(message) = parsed.message.or(parsed.error)
        && !message.trim().is_empty()
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_string()
}
