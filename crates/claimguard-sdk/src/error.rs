//! Error types for the ClaimGuard SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Token missing, expired or rejected (HTTP 401)
    #[error("Unauthorized - sign in again")]
    Unauthorized,

    /// Remote API answered with a non-success status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// Status code returned
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SdkError {
    /// Whether the caller should be sent back to sign-in
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SdkError::Unauthorized)
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else {
            match e.status() {
                Some(status) if status.as_u16() == 401 => SdkError::Unauthorized,
                Some(status) => SdkError::Api {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::Connection(e.to_string()),
            }
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
