//! Login, token refresh and logout.
//!
//! The service is the only writer of the session keys in storage; the
//! gateway reads the access token from the same storage on every request.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use varejo_core::UserId;
use varejo_gateway::{
    AUTH_TOKEN_KEY, Gateway, Method, REFRESH_TOKEN_KEY, RequestOptions, SessionStorage,
    StorageError, USER_DATA_KEY,
};

use crate::Role;
use crate::claims::{decode_claims, validate_claims};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// The logged-in user, as returned by `/auth/login` and kept in `user_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub nome: String,
    pub email: String,
    pub perfil: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub usuario: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Clone)]
pub struct AuthService {
    gateway: Gateway,
    storage: Arc<dyn SessionStorage>,
}

impl AuthService {
    pub fn new(gateway: Gateway, storage: Arc<dyn SessionStorage>) -> Self {
        Self { gateway, storage }
    }

    /// Authenticate and store the session (`auth_token`, `refresh_token`,
    /// `user_data`).
    pub async fn login(&self, email: &str, senha: &str) -> AuthResult<SessionUser> {
        let request = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };
        let response: LoginResponse = self.gateway.post("/auth/login", &request).await?;

        self.storage.set(AUTH_TOKEN_KEY, &response.token)?;
        match &response.refresh_token {
            Some(refresh) => self.storage.set(REFRESH_TOKEN_KEY, refresh)?,
            None => self.storage.remove(REFRESH_TOKEN_KEY)?,
        }
        let user_data = serde_json::to_string(&response.usuario).map_err(StorageError::from)?;
        self.storage.set(USER_DATA_KEY, &user_data)?;

        tracing::info!(user_id = %response.usuario.id, perfil = %response.usuario.perfil, "logged in");
        Ok(response.usuario)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Both stored tokens are replaced; the refresh token is kept when the
    /// backend does not rotate it.
    pub async fn refresh(&self) -> AuthResult<()> {
        let refresh_token = self
            .storage
            .get(REFRESH_TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let response: RefreshResponse = self
            .gateway
            .post(
                "/auth/refresh",
                &RefreshRequest {
                    refresh_token: &refresh_token,
                },
            )
            .await?;

        self.storage.set(AUTH_TOKEN_KEY, &response.token)?;
        if let Some(rotated) = &response.refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, rotated)?;
        }

        tracing::info!("access token refreshed");
        Ok(())
    }

    /// Notify the backend and clear the local session.
    ///
    /// Local state is cleared even when the backend call fails; that failure
    /// is still returned.
    pub async fn logout(&self) -> AuthResult<()> {
        let remote = self
            .gateway
            .execute("/auth/logout", RequestOptions::new(Method::POST))
            .await;
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "backend logout failed; clearing local session anyway");
        }

        self.clear_session()?;
        tracing::info!("logged out");
        remote.map_err(AuthError::from)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        self.storage.remove(USER_DATA_KEY)
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// User stored by the last login. Unreadable data counts as no user.
    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = self.storage.get(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable user_data");
                None
            }
        }
    }

    /// A token is stored and, when it is a readable JWT, not expired.
    ///
    /// Opaque tokens are trusted until the backend rejects them.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.access_token() else {
            return false;
        };
        match decode_claims(&token) {
            Ok(claims) => validate_claims(&claims, Utc::now()).is_ok(),
            Err(_) => true,
        }
    }

    /// Refresh the access token when it expires within `skew`.
    ///
    /// Returns whether a refresh happened.
    pub async fn ensure_fresh_token(&self, skew: Duration) -> AuthResult<bool> {
        let token = self.access_token().ok_or(AuthError::NotAuthenticated)?;
        let claims = decode_claims(&token)?;

        if !claims.expires_within(Utc::now(), skew) {
            return Ok(false);
        }

        tracing::debug!(exp = claims.exp, "access token close to expiry");
        self.refresh().await?;
        Ok(true)
    }
}
