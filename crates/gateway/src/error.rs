use thiserror::Error;

use varejo_core::DomainError;

use crate::storage::StorageError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure a backend call can surface.
///
/// Service modules propagate this unchanged; presenting it to a user is the
/// caller's job.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the backend's `message` field when it sent one, otherwise
    /// `HTTP error! status: <code>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request could not be built (invalid header, unserializable body).
    #[error("invalid request: {0}")]
    Request(String),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The response decoded but broke a structural invariant (e.g. pagination).
    #[error("schema violation: {0}")]
    Schema(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Fallback message for error responses without a usable `message`.
    pub fn http_fallback_message(status: u16) -> String {
        format!("HTTP error! status: {status}")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
