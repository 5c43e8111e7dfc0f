//! Transport abstraction for signed report requests.
//!
//! The paginator only needs one capability from the network: send a signed
//! POST and hand back status and body. [`Transport`] captures exactly that, so
//! the paging logic can be driven by [`HttpTransport`] in production and by an
//! in-memory transport in tests.
//!
//! Transports do not interpret status codes; a non-success status is turned
//! into [`ReportError::RequestFailed`](crate::ReportError::RequestFailed) by the
//! paginator.
//!
//! # Examples
//!
//! ```rust,no_run
//! use solidgate_reporting::transport::{HttpTransport, PostRequest, Transport};
//!
//! # async fn example() -> solidgate_reporting::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let request = PostRequest {
//!     url: "https://reports.solidgate.com/api/v1/card-orders",
//!     merchant: "api_pk_123",
//!     signature: "ZmFrZQ==",
//!     body: br#"{"date_from": "2022-04-01 00:00:00", "date_to": "2022-05-01 00:00:00"}"#,
//! };
//!
//! let response = transport.post(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

use std::fmt;
#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::{DEFAULT_USER_AGENT, HttpConfig};
pub use http::HttpTransport;

/// One signed POST to the reporting API.
#[derive(Clone, Copy)]
pub struct PostRequest<'a> {
    /// Absolute endpoint URL.
    pub url: &'a str,
    /// `Merchant` header value (channel public key).
    pub merchant: &'a str,
    /// `Signature` header value.
    pub signature: &'a str,
    /// JSON body, exactly the bytes that were signed.
    pub body: &'a [u8],
}

impl<'a> PostRequest<'a> {
    /// Header name/value pairs to attach to the request.
    #[must_use]
    pub const fn headers(&self) -> [(&'static str, &'a str); 3] {
        [
            ("Merchant", self.merchant),
            ("Signature", self.signature),
            ("Content-Type", "application/json"),
        ]
    }
}

impl fmt::Debug for PostRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostRequest")
            .field("url", &self.url)
            .field("merchant", &"[REDACTED]")
            .field("signature", &"[REDACTED]")
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Raw response from the reporting API.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends signed report requests.
///
/// Implementations must be usable from several concurrent queries, hence the
/// `Send + Sync` bound; the paginator itself never issues overlapping requests.
pub trait Transport: Send + Sync {
    /// Executes one POST and returns its status and body.
    ///
    /// # Errors
    ///
    /// Returns error only when no response was obtained (connection failure,
    /// timeout, unreadable body). Non-success statuses are returned as `Ok`.
    fn post<'a>(
        &'a self,
        request: PostRequest<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
