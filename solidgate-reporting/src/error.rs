//! Error types for the reporting client.
//!
//! Every fallible operation in this crate returns [`Result`]. Report streams
//! yield at most one error and then end, so the first `Err` a consumer sees
//! is the reason the query stopped.
//!
//! # Error Categories
//!
//! - **Protocol errors** ([`ReportError::RequestFailed`], [`ReportError::MissingKey`],
//!   [`ReportError::MalformedPage`]): the reporting API answered with something the
//!   client cannot page through
//! - **Record errors** ([`ReportError::Validation`]): a single row does not match its
//!   typed shape
//! - **Network errors** ([`ReportError::Http`]): the request never produced a response
//! - **Input errors** ([`ReportError::InvalidDateRange`], [`ReportError::Config`]):
//!   rejected before any request is sent
//!
//! # Examples
//!
//! ```
//! use solidgate_reporting::error::{ReportError, Result};
//!
//! fn require_items(present: bool) -> Result<()> {
//!     if !present {
//!         return Err(ReportError::MissingKey { key: "orders".to_owned() });
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_items(false).is_err());
//! ```

use thiserror::Error;

use crate::records::ReportKind;

/// Result type alias for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while querying the reporting API.
///
/// None of these are retried by the client. A query that hits one of them is
/// finished; issue a new query to try again.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum ReportError {
    /// The reporting API answered with a non-success status.
    ///
    /// Carries the status code and the response body verbatim, which usually
    /// contains the API's own error description (bad signature, unknown
    /// merchant, invalid date range).
    #[error("report request failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
    },

    /// A report page lacks the items field declared for its report kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use solidgate_reporting::error::ReportError;
    ///
    /// let err = ReportError::MissingKey { key: "alerts".to_owned() };
    /// assert_eq!(err.to_string(), "report page is missing the `alerts` field");
    /// ```
    #[error("report page is missing the `{key}` field")]
    MissingKey {
        /// The items field that was expected.
        key: String,
    },

    /// A page was readable JSON but not a report page.
    ///
    /// Raised when the body is not a JSON object, `metadata` or its
    /// `next_page_iterator` is absent, the cursor is neither a string nor null,
    /// or the items field is neither an object nor an array.
    #[error("malformed report page: {0}")]
    MalformedPage(String),

    /// A raw record does not conform to the typed shape of its report kind.
    #[error("invalid {kind} record: {source}")]
    Validation {
        /// Report the record belongs to.
        kind: ReportKind,
        /// Field-level deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// HTTP communication with the reporting API failed.
    ///
    /// Covers connection failures, timeouts and truncated response bodies.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be serialized.
    #[error("request serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request signature could not be computed.
    #[error("request signing failed: {0}")]
    Signature(String),

    /// A date range was rejected before sending.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// Client configuration is invalid.
    #[error("invalid client configuration: {0}")]
    Config(String),
}
