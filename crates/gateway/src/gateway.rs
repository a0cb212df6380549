//! Authenticated JSON requests against the ERP backend.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use varejo_core::Page;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::TokenProvider;

/// Method, JSON body and extra headers of a single call.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Request(format!("failed to serialize body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add a header; caller headers override the defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Successful (2xx) response of a non-JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Successful response, split on the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `Content-Type` contained `application/json`. An empty body is `Null`.
    Json(Value),
    /// Any other content type (CSV exports, `204 No Content`, ...).
    Raw(RawResponse),
}

/// HTTP client bound to one backend and one token source.
///
/// Cheap to clone; every clone shares the connection pool.
#[derive(Clone)]
pub struct Gateway {
    config: ApiConfig,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl Gateway {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenProvider>) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(config, http, tokens))
    }

    /// Use an existing `reqwest::Client` (shared pool, custom TLS, ...).
    pub fn with_client(
        config: ApiConfig,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            config,
            http,
            tokens,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue a request and classify the response.
    ///
    /// Non-2xx statuses become [`ClientError::Http`] carrying the backend's
    /// `message` (or the generic status message).
    #[tracing::instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<Reply> {
        let url = self.config.endpoint_url(endpoint);
        let headers = self.build_headers(&options.headers)?;

        let mut req = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!(error = %e, "request to backend failed");
            ClientError::Network(e)
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(|e| {
            tracing::error!(status, error = %e, "failed to read response body");
            ClientError::Network(e)
        })?;

        if !(200..300).contains(&status) {
            let message = error_message(status, &body);
            tracing::error!(status, %message, "backend returned an error");
            return Err(ClientError::Http { status, message });
        }

        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));

        if !is_json {
            tracing::debug!(status, content_type = ?content_type, "raw response");
            return Ok(Reply::Raw(RawResponse {
                status,
                content_type,
                body,
            }));
        }

        if body.trim().is_empty() {
            return Ok(Reply::Json(Value::Null));
        }

        let value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(status, error = %e, "malformed JSON body");
            ClientError::Decode(format!("malformed JSON from {endpoint}: {e}"))
        })?;

        tracing::debug!(status, "json response");
        Ok(Reply::Json(value))
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let reply = self.request(endpoint, RequestOptions::get()).await?;
        decode(endpoint, reply)
    }

    /// GET a paginated endpoint and check the page invariants.
    pub async fn get_page<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<Page<T>> {
        let page: Page<T> = self.get(endpoint).await?;
        page.check_invariants()
            .map_err(|e| ClientError::Schema(format!("{endpoint}: {e}")))?;
        Ok(page)
    }

    /// GET an endpoint whose body is plain text (CSV exports).
    pub async fn get_text(&self, endpoint: &str) -> ClientResult<String> {
        match self.request(endpoint, RequestOptions::get()).await? {
            Reply::Raw(raw) => Ok(raw.body),
            Reply::Json(Value::String(text)) => Ok(text),
            Reply::Json(other) => Ok(other.to_string()),
        }
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, endpoint, body).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, endpoint, body).await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<()> {
        self.execute(endpoint, RequestOptions::delete()).await
    }

    /// Issue a request and discard whatever the backend answered.
    pub async fn execute(&self, endpoint: &str, options: RequestOptions) -> ClientResult<()> {
        self.request(endpoint, options).await.map(|_| ())
    }

    async fn send_json<B, T>(&self, method: Method, endpoint: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new(method).json(body)?;
        let reply = self.request(endpoint, options).await?;
        decode(endpoint, reply)
    }

    fn build_headers(&self, extra: &[(String, String)]) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.access_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::Request("access token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Request(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Request(format!("invalid value for header '{name}': {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Best-effort error message: the JSON body's `message`, else the status.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| ClientError::http_fallback_message(status))
}

fn decode<T: DeserializeOwned>(endpoint: &str, reply: Reply) -> ClientResult<T> {
    match reply {
        Reply::Json(value) => serde_json::from_value(value).map_err(|e| {
            tracing::error!(error = %e, "response did not match the expected shape");
            ClientError::Decode(format!("unexpected response shape from {endpoint}: {e}"))
        }),
        Reply::Raw(raw) => Err(ClientError::Decode(format!(
            "expected a JSON response from {endpoint}, got status {} with content type {:?}",
            raw.status, raw.content_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_backend_message() {
        let body = r#"{"message":"Produto não encontrado","status":404}"#;
        assert_eq!(error_message(404, body), "Produto não encontrado");
    }

    #[test]
    fn error_message_falls_back_on_non_json() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP error! status: 502");
        assert_eq!(error_message(500, ""), "HTTP error! status: 500");
    }

    #[test]
    fn error_message_falls_back_when_message_missing_or_blank() {
        assert_eq!(error_message(422, r#"{"error":"x"}"#), "HTTP error! status: 422");
        assert_eq!(error_message(400, r#"{"message":""}"#), "HTTP error! status: 400");
        assert_eq!(error_message(400, r#"{"message":12}"#), "HTTP error! status: 400");
    }

    #[test]
    fn decode_rejects_raw_replies() {
        let reply = Reply::Raw(RawResponse {
            status: 204,
            content_type: None,
            body: String::new(),
        });
        let err = decode::<Value>("/products/1", reply).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn request_options_serialize_body() {
        let options = RequestOptions::new(Method::POST)
            .json(&serde_json::json!({ "nome": "Arroz" }))
            .unwrap()
            .header("X-Trace", "1");
        assert_eq!(options.body.unwrap()["nome"], "Arroz");
        assert_eq!(options.headers, vec![("X-Trace".to_string(), "1".to_string())]);
    }
}
