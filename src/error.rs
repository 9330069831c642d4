//! Errors returned by the anime data gateway

use thiserror::Error;

/// A failed gateway call.
///
/// Screen controllers treat every variant the same way: the failure is logged
/// and the screen falls back to an empty result set. The variants exist for
/// logs and for CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, reset...)
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("unexpected payload: {0}")]
    Payload(String),
}

impl FetchError {
    /// Shorthand for a "not found" status error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::Status {
            status: 404,
            message: what.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Payload(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}
