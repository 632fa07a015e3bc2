//! Error types for the hub client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during hub client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the hub.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Invalid response format from the hub.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request rejected locally before being sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An event stream ended while a message was still being read.
    #[error("Event stream closed")]
    StreamClosed,
}

impl ClientError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_)) || matches!(self.status(), Some(401 | 403))
    }

    /// `"{status} {reason}"` as shown in inline alerts.
    ///
    /// Transport failures have no status and report `0`, like a browser does.
    pub fn status_and_reason(&self) -> String {
        match self {
            Self::ApiError {
                status, message, ..
            } => format!("{} {}", status, message),
            other => format!("{} {}", other.status().unwrap_or(0), other),
        }
    }
}
