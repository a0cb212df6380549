//! `varejo-auth`: session lifecycle and user administration.
//!
//! - `AuthService`: login / refresh / logout against `/auth/*`, keeping the
//!   session tokens in an injected `SessionStorage`
//! - `TokenClaims`: local inspection of the access token (expiry only; the
//!   signature is the backend's business)
//! - `UserService`: CRUD over `/users`

pub mod claims;
pub mod error;
pub mod roles;
pub mod session;
pub mod users;

pub use claims::{TokenClaims, TokenValidationError, decode_claims, validate_claims};
pub use error::{AuthError, AuthResult};
pub use roles::Role;
pub use session::{AuthService, LoginRequest, LoginResponse, RefreshResponse, SessionUser};
pub use users::{User, UserFilter, UserInput, UserService};
