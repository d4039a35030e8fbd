//! Error types for the member claims client library.

use std::fmt;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A client-side validation failure on a single field.
///
/// Raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the offending field (e.g. `amountApproved`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur during client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response from the backend.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid argument provided by caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Client-side validation failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Returns the error message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(e) => e.to_string(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Rejected(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::InvalidArgument(msg) => msg.clone(),
            ClientError::Validation(v) => v.message.clone(),
        }
    }

    /// Returns the HTTP status code if the backend answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the offending field if this is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            ClientError::Validation(v) => Some(&v.field),
            _ => None,
        }
    }

    /// Returns true if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns true if this is a client-side validation or argument error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::InvalidArgument(_)
        )
    }

    /// Returns true if this is a connection or transport error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
