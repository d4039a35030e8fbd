//! Service layer.
//!
//! Every service call settles into an [`Outcome`]: either the data, or a
//! [`Failure`] whose message is non-empty and fit to show a member. Client
//! errors never cross this boundary unconverted, and are logged here.

mod claims;
mod payments;

pub use claims::ClaimsService;
pub use payments::PaymentsService;

use std::fmt;
use std::future::Future;

use memberclaims_client::{ClientError, ValidationError};
use tracing::{debug, error, warn};

/// Result of a service call.
pub type Outcome<T> = std::result::Result<T, Failure>;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend could not be reached or the exchange broke off.
    Transport,
    /// The backend answered with an error or an unusable body.
    Server,
    /// A client-side rule failed; nothing was sent.
    Validation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Transport => "transport",
            FailureKind::Server => "server",
            FailureKind::Validation => "validation",
        })
    }
}

/// A failed service call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    pub kind: FailureKind,
    /// Never empty.
    pub message: String,
    /// HTTP status, when the backend answered.
    pub status: Option<u16>,
    /// Offending field, for validation failures.
    pub field: Option<String>,
}

impl Failure {
    /// Convert a client error, using `fallback` when the error carries no
    /// usable message of its own.
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        let status = err.status();
        match err {
            ClientError::Transport(e) => Self {
                kind: FailureKind::Transport,
                message: if e.is_timeout() {
                    format!("{}: the server took too long to respond", fallback)
                } else {
                    format!("{}: unable to reach the server", fallback)
                },
                status,
                field: None,
            },
            ClientError::Server { message, .. } => Self {
                kind: FailureKind::Server,
                message: with_fallback(message, fallback),
                status,
                field: None,
            },
            ClientError::Rejected(message) => Self {
                kind: FailureKind::Server,
                message: with_fallback(message, fallback),
                status: None,
                field: None,
            },
            ClientError::Decode(_) => Self {
                kind: FailureKind::Server,
                message: format!("{}: unexpected response from the server", fallback),
                status: None,
                field: None,
            },
            ClientError::InvalidArgument(message) => Self {
                kind: FailureKind::Validation,
                message: with_fallback(message, fallback),
                status: None,
                field: None,
            },
            ClientError::Validation(v) => Self::validation(v),
        }
    }

    pub fn validation(err: ValidationError) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: with_fallback(err.message, "Invalid input"),
            status: None,
            field: Some(err.field).filter(|f| !f.is_empty()),
        }
    }

    /// Whether re-issuing the same call could succeed ("Try Again").
    pub fn is_retryable(&self) -> bool {
        self.kind != FailureKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

fn with_fallback(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Settle a client call into an [`Outcome`], logging failures.
pub(crate) async fn settle<T, F>(op: &'static str, fallback: &str, call: F) -> Outcome<T>
where
    F: Future<Output = memberclaims_client::Result<T>>,
{
    match call.await {
        Ok(value) => {
            debug!(op, "service call succeeded");
            Ok(value)
        }
        Err(err) => Err(reject(op, Failure::from_client(err, fallback))),
    }
}

/// Log a failure at the boundary and hand it back.
pub(crate) fn reject(op: &'static str, failure: Failure) -> Failure {
    match failure.kind {
        FailureKind::Validation => warn!(
            op,
            field = failure.field.as_deref().unwrap_or(""),
            message = %failure.message,
            "request refused before sending"
        ),
        kind => error!(
            op,
            %kind,
            status = failure.status.unwrap_or(0),
            message = %failure.message,
            "service call failed"
        ),
    }
    failure
}
