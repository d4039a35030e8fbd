//! The `{success, data, message}` wire envelope.
//!
//! Every backend response is wrapped in an envelope. This module turns it
//! into a `Result` so callers never inspect the `success` flag themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Longest body excerpt kept in server error messages.
pub const BODY_EXCERPT_LEN: usize = 200;

/// Raw response envelope as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Convert into a result, requiring `data` on success.
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(ClientError::Rejected(non_empty_message(self.message)));
        }
        self.data
            .ok_or_else(|| ClientError::Decode("response envelope has no data".to_string()))
    }

    /// Convert into a result, ignoring any `data` on success.
    pub fn into_unit(self) -> Result<()> {
        if !self.success {
            return Err(ClientError::Rejected(non_empty_message(self.message)));
        }
        Ok(())
    }
}

fn non_empty_message(message: Option<String>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => "request was not successful".to_string(),
    }
}

/// Decode a response body given its HTTP status.
///
/// Non-2xx responses prefer the envelope's `message`, then a truncated
/// excerpt of the raw body.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    decode_envelope::<T>(status, body)?.into_result()
}

/// Like [`decode`], for endpoints whose success carries no useful data.
pub fn decode_unit(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) && body.trim().is_empty() {
        return Ok(());
    }
    decode_envelope::<serde_json::Value>(status, body)?.into_unit()
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>> {
    if !(200..300).contains(&status) {
        return Err(server_error(status, body));
    }
    serde_json::from_str::<Envelope<T>>(body)
        .map_err(|e| ClientError::Decode(format!("response body: {}", e)))
}

fn server_error(status: u16, body: &str) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            if excerpt.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, excerpt)
            }
        });

    ClientError::Server { status, message }
}
