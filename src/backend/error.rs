use reqwest::StatusCode;
use thiserror::Error;

/// Failures produced by [`super::BackendClient`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never got an HTTP response (connection refused, reset, timeout)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("backend returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// A 2xx response whose body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl BackendError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
