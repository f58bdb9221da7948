//! Error types for the sync engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Retry policy class for remote failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRetryClass {
    Retryable,
    Permanent,
    ReauthRequired,
}

/// Local store failures. These are fatal to the calling operation: local
/// durability is the correctness baseline, so they are always surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record lookup failed for a key the caller expected to exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Underlying storage backend failure.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Remote store failures. During opportunistic pushes and flush passes these
/// are logged and swallowed; only `pull_all`'s collection fetch surfaces one.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level failure (connect, timeout, body).
    #[error("transport error: {0}")]
    Transport(String),

    /// Error response from the remote document API.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Remote document could not be produced or parsed.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl RemoteError {
    /// Create an API error from status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify error for retry policy.
    pub fn retry_class(&self) -> RemoteRetryClass {
        match self {
            Self::Api { status, .. } => match *status {
                401 | 403 => RemoteRetryClass::ReauthRequired,
                408 | 409 | 423 | 425 | 429 => RemoteRetryClass::Retryable,
                500..=599 => RemoteRetryClass::Retryable,
                _ => RemoteRetryClass::Permanent,
            },
            Self::Transport(_) => RemoteRetryClass::Retryable,
            Self::InvalidDocument(_) => RemoteRetryClass::Permanent,
        }
    }
}

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("local store error: {0}")]
    Store(#[from] StoreError),

    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),

    /// A record or remote document is missing its identity fields.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_class_for_server_errors_is_retryable() {
        assert_eq!(
            RemoteError::api(500, "boom").retry_class(),
            RemoteRetryClass::Retryable
        );
        assert_eq!(
            RemoteError::api(429, "slow down").retry_class(),
            RemoteRetryClass::Retryable
        );
        assert_eq!(
            RemoteError::Transport("timeout".into()).retry_class(),
            RemoteRetryClass::Retryable
        );
    }

    #[test]
    fn retry_class_for_auth_error_is_reauth() {
        assert_eq!(
            RemoteError::api(401, "unauthorized").retry_class(),
            RemoteRetryClass::ReauthRequired
        );
    }

    #[test]
    fn retry_class_for_client_errors_is_permanent() {
        assert_eq!(
            RemoteError::api(400, "bad payload").retry_class(),
            RemoteRetryClass::Permanent
        );
        assert_eq!(
            RemoteError::InvalidDocument("not an object".into()).retry_class(),
            RemoteRetryClass::Permanent
        );
    }
}
