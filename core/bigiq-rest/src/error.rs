//! REST transport error types.

use thiserror::Error;

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;

/// Errors raised by the transport itself, before a response status is seen.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RestError {
    /// Returns true if the error came from the login exchange.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            RestError::AuthFailed(_) => true,
            RestError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 401),
            _ => false,
        }
    }
}
