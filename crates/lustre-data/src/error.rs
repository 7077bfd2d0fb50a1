//! HTTP client error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid URL or request parameters.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// True when the request failed before a response arrived.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout(_))
    }

    /// True when the server answered with a non-success status.
    pub fn is_server_error(&self) -> bool {
        matches!(self, FetchError::HttpError { .. })
    }

    /// HTTP status, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(timeout)
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(FetchError::Network("reset".into()).is_network_failure());
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_network_failure());

        let http = FetchError::HttpError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(http.is_server_error());
        assert!(!http.is_network_failure());
        assert_eq!(http.status(), Some(503));
    }

    #[test]
    fn test_display() {
        let err = FetchError::HttpError {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
