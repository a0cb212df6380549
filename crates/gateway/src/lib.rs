//! `varejo-gateway`
//!
//! **Responsibility:** the single HTTP entry point to the ERP backend.
//!
//! This crate provides:
//! - `Gateway`: authenticated JSON requests, error-message extraction, typed
//!   decoding at the boundary
//! - `ApiConfig`: base URL / timeout configuration
//! - `SessionStorage`: client-side key/value storage for the session tokens
//! - `TokenProvider`: how the gateway obtains the bearer token on every call
//!
//! Resource crates (`varejo-products`, `varejo-parties`, ...) are thin layers
//! on top of this one.

pub mod config;
pub mod error;
pub mod gateway;
pub mod storage;
pub mod token;

pub use config::{ApiConfig, DEFAULT_API_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use gateway::{Gateway, RawResponse, Reply, RequestOptions};
pub use storage::{
    AUTH_TOKEN_KEY, FileStorage, MemoryStorage, REFRESH_TOKEN_KEY, SessionStorage, StorageError,
    USER_DATA_KEY,
};
pub use token::{StaticToken, StorageTokenProvider, TokenProvider};

pub use reqwest::Method;
