use log::debug;
use std::sync::Arc;
use url::Url;

use super::gate::{RequestGate, Unlimited};
use super::normalize::{normalize, DataShape, RequestOutcome};
use super::resource;
use super::transport::{Credentials, HttpTransport, Transport};
use super::{API_VERSION, BASE_URL};
use crate::error::{FsrError, Result};

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Register account credentials
    pub credentials: Credentials,
    /// API root, including the version segment
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
    /// Admission control shared by every call made through the client
    pub gate: Arc<dyn RequestGate>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::new("", ""),
            base_url: BASE_URL.to_string(),
            timeout: 30,
            user_agent: format!("fsreg/{}", env!("CARGO_PKG_VERSION")),
            gate: Arc::new(Unlimited),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("gate", &self.gate.name())
            .finish()
    }
}

/// Financial Services Register API client
#[derive(Clone)]
pub struct RegisterClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    gate: Arc<dyn RequestGate>,
}

impl std::fmt::Debug for RegisterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterClient")
            .field("base_url", &self.base_url)
            .field("gate", &self.gate.name())
            .finish_non_exhaustive()
    }
}

impl RegisterClient {
    /// Create a client backed by the HTTP transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        if !config.credentials.is_complete() {
            return Err(FsrError::NoCredentials);
        }
        let transport =
            HttpTransport::new(&config.credentials, config.timeout, &config.user_agent)?;
        Self::with_transport(Arc::new(transport), config.gate, &config.base_url)
    }

    /// Create a client over caller-supplied collaborators
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        gate: Arc<dyn RequestGate>,
        base_url: &str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FsrError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FsrError::Config(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }
        Ok(Self {
            base_url,
            transport,
            gate,
        })
    }

    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `segments` below the API root; each segment is percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FsrError::Config(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET one endpoint under a gate permit and normalize the response.
    ///
    /// The permit is held for the network call only and is dropped before
    /// the body is normalized, on every exit path.
    pub(crate) async fn request(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
        shape: DataShape,
    ) -> Result<RequestOutcome> {
        let url = self.endpoint(segments)?;
        debug!("Register request {} (gate: {})", url.path(), self.gate.name());

        let raw = {
            let _permit = self.gate.acquire().await?;
            self.transport.get(&url, params).await?
        };

        normalize(&raw, shape)
    }

    /// Fetch an entity, or one of its sub-resource views, by reference number.
    ///
    /// `resource_type` and every modifier are validated before any request is
    /// made. An unknown reference number is not an error: the register answers
    /// "no result found" and the outcome is a success with empty data.
    pub async fn get_resource_info(
        &self,
        reference_number: &str,
        resource_type: &str,
        modifiers: &[&str],
    ) -> Result<RequestOutcome> {
        let info = resource::lookup(resource_type)?;
        info.validate_modifiers(modifiers)?;

        let mut segments = Vec::with_capacity(2 + modifiers.len());
        segments.push(info.endpoint_base);
        segments.push(reference_number);
        segments.extend_from_slice(modifiers);

        self.request(&segments, &[], info.data_shape(modifiers))
            .await
    }

    /// List the regulated markets known to the register
    pub async fn get_regulated_markets(&self) -> Result<RequestOutcome> {
        self.request(&["CommonSearch"], &[("q", "RM")], DataShape::Array)
            .await
    }
}
