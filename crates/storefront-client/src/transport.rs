//! # Transport
//!
//! Request/response access to the backend.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       HttpTransport::send                               │
//! │                                                                         │
//! │  path ──► base_url.join(path) ──► + query params                        │
//! │                                      │                                  │
//! │             method != GET and path not exempt?                          │
//! │                   │ yes                                                 │
//! │                   ▼                                                     │
//! │     cookie jar XSRF-TOKEN ──► X-XSRF-TOKEN header                       │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                           reqwest (cookies, timeout)                    │
//! │                                      │                                  │
//! │            2xx ──► JSON body (Null if empty)                            │
//! │          other ──► TransportError::Status { status, message }           │
//! │                    message = body.message when the body is JSON         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session (auth + CSRF cookies) lives in the transport's cookie jar and
//! is shared by every request made through the same instance.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult, TransportError, TransportResult};

/// Query parameters, in order.
pub type Params = Vec<(String, String)>;

/// A request/response collaborator for the backend.
///
/// Paths are absolute (`/api/v1/...`). Bodies and results are raw JSON;
/// callers decode into their own types.
#[automock]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, params: Params) -> TransportResult<Value>;

    async fn post(&self, path: &str, body: Option<Value>, params: Params) -> TransportResult<Value>;

    async fn put(&self, path: &str, body: Option<Value>, params: Params) -> TransportResult<Value>;

    async fn delete(&self, path: &str, params: Params) -> TransportResult<Value>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// [`Transport`] over HTTP with a persistent cookie session.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    csrf_cookie: String,
    csrf_header: String,
    csrf_exempt_paths: Vec<String>,
}

impl HttpTransport {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", settings.base_url, e)))?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(HttpTransport {
            client,
            jar,
            base_url,
            csrf_cookie: settings.csrf_cookie.clone(),
            csrf_header: settings.csrf_header.clone(),
            csrf_exempt_paths: settings.csrf_exempt_paths.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current CSRF token from the cookie jar, if the backend has set one.
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let prefix = format!("{}=", self.csrf_cookie);
        header
            .to_str()
            .ok()?
            .split(';')
            .map(str::trim)
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            .map(str::to_string)
    }

    fn needs_csrf(&self, method: &Method, path: &str) -> bool {
        *method != Method::GET && !self.csrf_exempt_paths.iter().any(|p| p == path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        params: Params,
    ) -> TransportResult<Value> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))?;

        let mut request = self.client.request(method.clone(), url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if self.needs_csrf(&method, path) {
            match self.csrf_token() {
                Some(token) => request = request.header(self.csrf_header.as_str(), token),
                None => debug!(%method, path, "No CSRF token in cookie jar"),
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!(%method, path, "Sending request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                warn!(%method, path, status = status.as_u16(), "Not authorized");
            } else {
                debug!(%method, path, status = status.as_u16(), ?message, "Request failed");
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// The `message` field of a backend error body, when present and non-empty.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, params: Params) -> TransportResult<Value> {
        self.send(Method::GET, path, None, params).await
    }

    async fn post(&self, path: &str, body: Option<Value>, params: Params) -> TransportResult<Value> {
        self.send(Method::POST, path, body, params).await
    }

    async fn put(&self, path: &str, body: Option<Value>, params: Params) -> TransportResult<Value> {
        self.send(Method::PUT, path, body, params).await
    }

    async fn delete(&self, path: &str, params: Params) -> TransportResult<Value> {
        self.send(Method::DELETE, path, None, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ApiSettings::default()).unwrap()
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"status":400,"message":"Size M is out of stock","errors":[],
                       "timestamp":"2024-01-01T00:00:00","path":"/api/v1/order/createOrder"}"#;
        assert_eq!(error_message(body).as_deref(), Some("Size M is out of stock"));
        assert_eq!(error_message(r#"{"message":""}"#), None);
        assert_eq!(error_message(r#"{"error":"x"}"#), None);
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_csrf_policy() {
        let t = transport();
        assert!(!t.needs_csrf(&Method::GET, "/api/v1/product/allProducts"));
        assert!(t.needs_csrf(&Method::POST, "/api/v1/order/createOrder"));
        assert!(t.needs_csrf(&Method::DELETE, "/api/v1/product/p1"));
        assert!(!t.needs_csrf(&Method::POST, "/api/v1/auth/login"));
    }

    #[test]
    fn test_csrf_token_read_from_jar() {
        let t = transport();
        assert_eq!(t.csrf_token(), None);

        t.jar.add_cookie_str("XSRF-TOKEN=abc123; Path=/", t.base_url());
        t.jar.add_cookie_str("SESSION=s1; Path=/", t.base_url());
        assert_eq!(t.csrf_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let settings = ApiSettings {
            base_url: "::not a url::".to_string(),
            ..ApiSettings::default()
        };
        assert!(matches!(
            HttpTransport::new(&settings),
            Err(ClientError::Transport(TransportError::InvalidUrl(_)))
        ));
    }
}
