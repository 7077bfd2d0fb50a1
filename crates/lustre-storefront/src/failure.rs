//! User-facing classification of fetch errors.

use lustre_data::FetchError;
use thiserror::Error;

/// Why a fetch produced nothing to render.
///
/// An empty result is not a failure; feeds and search report it as its
/// own state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// No response arrived: offline, refused, timed out, or a bad URL.
    #[error("Can't reach the store right now. ({message})")]
    NetworkFailure { message: String },
    /// The server answered with an error status or an unreadable body.
    #[error("Something went wrong on our end. ({message})")]
    ServerError { status: Option<u16>, message: String },
}

impl FetchFailure {
    /// Short copy for the error panel.
    pub fn headline(&self) -> &'static str {
        match self {
            FetchFailure::NetworkFailure { .. } => "Can't reach the store right now.",
            FetchFailure::ServerError { .. } => "Something went wrong on our end.",
        }
    }

    /// Underlying error text, for logs and verbose output.
    pub fn detail(&self) -> &str {
        match self {
            FetchFailure::NetworkFailure { message } => message,
            FetchFailure::ServerError { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchFailure::NetworkFailure { .. } => None,
            FetchFailure::ServerError { status, .. } => *status,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchFailure::NetworkFailure { .. })
    }
}

impl From<&FetchError> for FetchFailure {
    fn from(error: &FetchError) -> Self {
        let message = error.to_string();
        match error {
            FetchError::Network(_) | FetchError::Timeout(_) | FetchError::InvalidUrl(_) => {
                FetchFailure::NetworkFailure { message }
            }
            FetchError::HttpError { status, .. } => FetchFailure::ServerError {
                status: Some(*status),
                message,
            },
            FetchError::ParseError(_) => FetchFailure::ServerError {
                status: None,
                message,
            },
        }
    }
}

impl From<FetchError> for FetchFailure {
    fn from(error: FetchError) -> Self {
        FetchFailure::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_classification() {
        assert!(FetchFailure::from(FetchError::Network("refused".into())).is_network());
        assert!(FetchFailure::from(FetchError::Timeout(Duration::from_secs(10))).is_network());

        let failure = FetchFailure::from(FetchError::HttpError {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert!(!failure.is_network());
        assert_eq!(failure.status(), Some(503));

        let failure = FetchFailure::from(FetchError::ParseError("expected value".into()));
        assert_eq!(failure.status(), None);
        assert_eq!(failure.headline(), "Something went wrong on our end.");
    }
}
