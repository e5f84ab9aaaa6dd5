//! Normalized failures of backend requests.
//!
//! Every failed call through [`crate::api::client::ApiClient`] surfaces as an
//! [`ApiError`]. The error keeps the raw status and body for diagnostics and
//! offers [`ApiError::user_message`] for anything shown on screen.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status code.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, parsed as JSON when possible, otherwise kept as a string.
        body: Value,
    },

    /// No response arrived before the request timeout elapsed.
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The request never produced a response (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built, usually because of a malformed base URL.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Message suitable for an end user.
    ///
    /// Prefers a string `detail` field of the error body, then a string
    /// `message` field, and falls back to the generic transport description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => {
                extract_body_message(body).unwrap_or_else(|| self.to_string())
            }
            _ => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }
}

fn extract_body_message(body: &Value) -> Option<String> {
    ["detail", "message"].iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    })
}
