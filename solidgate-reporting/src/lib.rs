//! Solidgate Reporting: typed, lazily paginated access to merchant reports
//!
//! A client for the Solidgate reporting API. Ask for a report over a date
//! range and get back a stream of typed records; request signing, cursor
//! pagination and the API's loose JSON shapes are handled underneath.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   ReportClient   │  one operation per report kind
//! └────────┬─────────┘
//!          │ Stream<Item = Result<Record>>
//! ┌────────▼─────────────────────────────────────────────┐
//! │  Paginator ──▶ extract_records ──▶ Report::from_raw  │
//! │  (pages)       (map or array)      (typed records)   │
//! └────────┬─────────────────────────────────────────────┘
//!          │ POST + Merchant/Signature headers
//! ┌────────▼─────────┐
//! │    Transport     │  HttpTransport (reqwest) or your own
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use futures::TryStreamExt;
//! use solidgate_reporting::{Channel, DateRange, ReportClient};
//!
//! # async fn example() -> solidgate_reporting::Result<()> {
//! let channel = Channel::new("main-shop", "api_pk_123", "api_sk_456");
//! let client = ReportClient::new(channel)?;
//!
//! let day = |m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let orders = client.card_orders(DateRange::new(day(4), day(5))?);
//! futures::pin_mut!(orders);
//!
//! while let Some(order) = orders.try_next().await? {
//!     println!("{} {} {}", order.order_id, order.amount, order.currency);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`ReportClient`] facade
//! - [`report`]: request bodies, pages, pagination and record extraction
//! - [`records`]: typed records and the [`Report`](records::Report) trait
//! - [`auth`]: merchant channels and request signing
//! - [`transport`]: the [`Transport`](transport::Transport) seam and the reqwest implementation
//! - [`config`]: TOML client configuration
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! Report streams are fail-fast: the first error is yielded and the stream
//! ends, without requesting further pages.
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use solidgate_reporting::{DateRange, ReportClient, ReportError};
//!
//! # async fn example(client: ReportClient, range: DateRange) {
//! let alerts = client.fraud_alerts(range);
//! futures::pin_mut!(alerts);
//!
//! while let Some(alert) = alerts.next().await {
//!     match alert {
//!         Ok(alert) => println!("{}", alert.order_id),
//!         Err(ReportError::RequestFailed { status, body }) => eprintln!("API said {status}: {body}"),
//!         Err(ReportError::Validation { kind, source }) => eprintln!("bad {kind} row: {source}"),
//!         Err(e) => eprintln!("report failed: {e}"),
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]
#![recursion_limit = "256"]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod records;
pub mod report;
pub mod transport;

pub use auth::Channel;
pub use client::ReportClient;
pub use config::ClientConfig;
pub use error::{ReportError, Result};
pub use records::{
    ApmOrder, CardOrder, ChargebackOrder, FraudAlert, PaypalDispute, Report, ReportKind,
    Subscription,
};
pub use report::{DateRange, ReportPage};
