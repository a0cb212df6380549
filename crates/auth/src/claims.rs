use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Claims of the access token issued by `/auth/login` and `/auth/refresh`.
///
/// Times are Unix seconds, as in every JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the user's e-mail on this backend).
    pub sub: String,

    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perfil: Option<Role>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| Utc.timestamp_opt(iat, 0).single())
    }

    /// True when the token is already expired or expires within `skew`.
    pub fn expires_within(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at - skew <= now,
            None => true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Read the claims of a JWT without checking its signature.
///
/// The client never holds the signing key; this is only used to decide when
/// to refresh.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenValidationError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenValidationError::Malformed(e.to_string()))
}

/// Check the time window of the claims against `now`.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let expires_at = claims.expires_at().ok_or(TokenValidationError::InvalidTimeWindow)?;

    if let Some(issued_at) = claims.issued_at() {
        if expires_at <= issued_at {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
        if now < issued_at {
            return Err(TokenValidationError::NotYetValid);
        }
    }
    if now >= expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    fn mint(claims: &TokenClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    fn claims(iat: i64, exp: i64) -> TokenClaims {
        TokenClaims {
            sub: "ana@loja.com".to_string(),
            exp,
            iat: Some(iat),
            perfil: Some(Role::GERENTE),
        }
    }

    #[test]
    fn decodes_without_knowing_the_secret() {
        let now = Utc::now().timestamp();
        let original = claims(now, now + 600);
        let decoded = decode_claims(&mint(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decodes_expired_tokens_too() {
        let original = claims(1_000, 2_000);
        let decoded = decode_claims(&mint(&original)).unwrap();
        assert_eq!(decoded.exp, 2_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(TokenValidationError::Malformed(_))
        ));
    }

    #[test]
    fn time_window_checks() {
        let now = Utc.timestamp_opt(10_000, 0).unwrap();

        assert_eq!(validate_claims(&claims(9_000, 11_000), now), Ok(()));
        assert_eq!(
            validate_claims(&claims(9_000, 10_000), now),
            Err(TokenValidationError::Expired)
        );
        assert_eq!(
            validate_claims(&claims(10_500, 11_000), now),
            Err(TokenValidationError::NotYetValid)
        );
        assert_eq!(
            validate_claims(&claims(11_000, 11_000), now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn expires_within_skew() {
        let now = Utc.timestamp_opt(10_000, 0).unwrap();
        let token = claims(9_000, 10_030);
        assert!(token.expires_within(now, Duration::seconds(60)));
        assert!(!token.expires_within(now, Duration::seconds(10)));
    }
}
