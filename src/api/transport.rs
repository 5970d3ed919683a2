use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::{FsrError, RequestErrorKind, Result};

pub const AUTH_EMAIL_HEADER: &str = "x-auth-email";
pub const AUTH_KEY_HEADER: &str = "x-auth-key";

/// Status code and undecoded body of a register response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Outbound GET used by the client; connection pooling, TLS and timeouts
/// belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fails with a `Transport` request error when no response is received
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<RawResponse>;
}

/// Register account credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account e-mail sent as `X-AUTH-EMAIL`
    pub username: String,
    /// API key sent as `X-AUTH-KEY`
    pub key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.key.trim().is_empty()
    }

    /// Default headers for every register request
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTH_EMAIL_HEADER,
            HeaderValue::from_str(&self.username)
                .map_err(|e| FsrError::Config(format!("invalid API username: {}", e)))?,
        );
        let mut key = HeaderValue::from_str(&self.key)
            .map_err(|e| FsrError::Config(format!("invalid API key: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(AUTH_KEY_HEADER, key);
        Ok(headers)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &mask_secret(&self.key))
            .finish()
    }
}

/// Mask all but the first four characters of a secret
pub fn mask_secret(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    if value.chars().count() > 4 {
        format!("{}...({} characters)", visible, value.chars().count())
    } else {
        "****".to_string()
    }
}

/// `reqwest`-backed transport with authentication headers
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(credentials: &Credentials, timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = ClientBuilder::new()
            .default_headers(credentials.headers()?)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| FsrError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client; it must already send the auth headers
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<RawResponse> {
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url.clone()).query(params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            FsrError::request(
                RequestErrorKind::Transport,
                format!("failed to read response body: {}", e),
            )
        })?;

        debug!("HTTP {} ({} bytes) from {}", status, body.len(), url.path());
        Ok(RawResponse { status, body })
    }
}
