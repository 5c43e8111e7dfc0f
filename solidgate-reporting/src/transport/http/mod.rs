//! Reqwest-backed transport.
//!
//! One pooled client serves every query; TLS and HTTP/2 are negotiated by
//! reqwest.

use reqwest::Client;
use tracing::{debug, instrument};

use super::config::HttpConfig;
use crate::{
    error::{ReportError, Result},
    transport::{PostRequest, Transport, TransportResponse},
};

/// Transport that sends report requests with reqwest.
///
/// # Examples
///
/// ```
/// use solidgate_reporting::transport::{HttpConfig, HttpTransport, Transport};
///
/// let config = HttpConfig { timeout_secs: 120, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "https");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default [`HttpConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with the given limits and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`] if the client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ReportError::Http)?;

        Ok(Self { client })
    }

    #[instrument(skip(self, request), fields(url = request.url, body_len = request.body.len()))]
    async fn execute_post(&self, request: PostRequest<'_>) -> Result<TransportResponse> {
        let mut builder = self.client.post(request.url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.body(request.body.to_vec()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, response_len = body.len(), "report API responded");

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn post<'a>(&'a self, request: PostRequest<'a>) -> Result<TransportResponse> {
        self.execute_post(request).await
    }

    fn protocol_name(&self) -> &'static str {
        "https"
    }
}
