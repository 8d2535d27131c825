//! Error types for the storefront client.
//!
//! Every failure the client can produce is an [`ApiError`]. None of them are
//! fatal: callers keep their previous state and surface
//! [`ApiError::user_message`] to the user.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by storefront operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("<no message>"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the JSON error body, when there was one.
        message: Option<String>,
    },

    /// The request never produced a response (connection refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built or a local file could not be read.
    #[error("Client error: {0}")]
    Client(String),

    /// The response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// An authenticated call was attempted without a stored token.
    #[error("No authentication token found. Please log in again.")]
    NoToken,

    /// The login endpoint answered 2xx but did not include a token.
    #[error("Login response did not contain a token")]
    MissingToken,

    /// Input was rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status associated with this error, `0` for network failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) => Some(0),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials (401 or 403).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Status { status: 500..=599, .. }
        )
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, message } => handle_http_error(*status, message.as_deref()),
            Self::Network(_) => handle_http_error(0, None),
            Self::Client(msg) => format!("Client error: {msg}"),
            Self::Decode(_) | Self::MissingToken => "An unexpected error occurred".to_string(),
            Self::NoToken | Self::Validation(_) => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Client(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Client(err.to_string())
    }
}

/// JSON error body returned by the backend's exception handlers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// Translate an HTTP status into a user-facing message.
///
/// `server_message` is the `message` field of the error body. It is only
/// shown for 400 (as details) and for statuses without a fixed message.
#[must_use]
pub fn handle_http_error(status: u16, server_message: Option<&str>) -> String {
    let server_message = server_message.map(str::trim).filter(|m| !m.is_empty());

    match status {
        400 => server_message.map_or_else(
            || "Please check your input and try again.".to_string(),
            |details| format!("Please check your input and try again.\n\nDetails: {details}"),
        ),
        401 => "The password you’ve entered is incorrect. Please try again.".to_string(),
        403 => "You don't have permission to perform this action.".to_string(),
        404 => "Resource not found.".to_string(),
        409 => "Your Email is already registered. Please try logging in or use a different email address."
            .to_string(),
        413 => "File too large. Please select smaller files under 2MB.".to_string(),
        422 => "Invalid data format. Please check your input.".to_string(),
        500 | 503 => "Server error. Please try again later.".to_string(),
        0 => "Network error. Please check your connection.".to_string(),
        other => server_message.map_or_else(
            || {
                let reason = StatusCode::from_u16(other)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown Error");
                format!("Server error ({other}): {reason}")
            },
            str::to_string,
        ),
    }
}
