//! Error types for the Easy Rider client.

use reqwest::StatusCode;
use rider_core::RiderError;
use thiserror::Error;

/// Errors that can occur when interacting with the Easy Rider API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available, or token rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The signed-in user may not perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// A record from the server failed domain conversion
    #[error(transparent)]
    Core(#[from] RiderError),
}

impl ClientError {
    /// Classify a transport error, separating "could not reach the server"
    /// from everything else.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::ServerUnreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }

    /// Whether this is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServerError { status: 404, .. })
    }
}

/// Build the error for a non-success response.
///
/// `what` names the entity for 404 messages, e.g. `"User 3"`.
pub(crate) async fn error_for_status(response: reqwest::Response, what: &str) -> ClientError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => ClientError::AuthRequired,
        StatusCode::FORBIDDEN => {
            let error_text = response.text().await.unwrap_or_default();
            ClientError::Forbidden(error_text)
        }
        StatusCode::NOT_FOUND => ClientError::ServerError {
            status: 404,
            message: format!("{} not found", what),
        },
        _ => {
            let error_text = response.text().await.unwrap_or_default();
            ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            }
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
