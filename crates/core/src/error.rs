//! Errors detected on the client before (or instead of) a backend round trip.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Malformed ids, rejected input and backend payloads that break a contract
/// we rely on. Transport failures live in the gateway's `ClientError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before it was sent (empty name, negative price, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Data that cannot be right whatever the caller meant, such as a page
    /// whose `first` flag disagrees with its `number`.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A string id that does not parse as the backend's integer key.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// The detail without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::InvariantViolation(msg) | Self::InvalidId(msg) => msg,
        }
    }
}
