use thiserror::Error;

use varejo_gateway::{ClientError, StorageError};

use crate::claims::TokenValidationError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend call itself failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no active session")]
    NotAuthenticated,

    #[error("no refresh token stored")]
    MissingRefreshToken,

    #[error("access token rejected: {0}")]
    Token(#[from] TokenValidationError),
}

impl AuthError {
    /// HTTP status of the underlying backend error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client(err) => err.status(),
            _ => None,
        }
    }
}
