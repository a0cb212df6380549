//! Backend location and transport settings.

use std::time::Duration;

/// Base URL used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `API_BASE_URL` and `API_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("API_BASE_URL not set; using {}", DEFAULT_API_BASE_URL);
                DEFAULT_API_BASE_URL.to_string()
            });

        let mut config = Self::new(base_url);

        if let Some(raw) = lookup("API_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!("ignoring invalid API_TIMEOUT_SECS value: {raw}"),
            }
        }

        config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Join an endpoint path (`/products?page=0`) to the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
