//! Bearer token lookup.
//!
//! The gateway asks its provider for a token on every request, so a token
//! written by the refresh flow is picked up by the very next call.

use std::sync::Arc;

use crate::storage::{AUTH_TOKEN_KEY, SessionStorage};

pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Fixed token (or none). Mostly for scripts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads `auth_token` from a [`SessionStorage`] at call time.
#[derive(Clone)]
pub struct StorageTokenProvider {
    storage: Arc<dyn SessionStorage>,
}

impl StorageTokenProvider {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }
}

impl TokenProvider for StorageTokenProvider {
    fn access_token(&self) -> Option<String> {
        self.storage
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }
}
