//! Error types shared by the lookup pipeline and its backends.

use thiserror::Error;

/// Failure talking to the search backend.
///
/// Every variant means "the backend could not answer", which callers must keep
/// distinct from "the backend answered with no matches".
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("search backend unreachable: {0}")]
    Unavailable(String),

    #[error("search backend did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("search backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode search backend response: {0}")]
    Decode(String),
}

/// Errors surfaced by [`LookupService`](crate::lookup::LookupService) operations.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request parameters rejected before any backend call.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A bulk sub-lookup task panicked or was cancelled.
    #[error("lookup task for {key:?} failed: {reason}")]
    TaskFailed { key: String, reason: String },
}

impl LookupError {
    pub fn validation(message: impl Into<String>) -> Self {
        LookupError::Validation(message.into())
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid ranking profile: {0}")]
    Ranking(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;
