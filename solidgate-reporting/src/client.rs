//! Report client facade.
//!
//! [`ReportClient`] wires the pieces together for each report kind:
//!
//! ```text
//! Paginator (pages) -> extract_records (raw rows) -> Report::from_raw (typed records)
//! ```
//!
//! Every operation returns a lazy stream. Nothing is sent until the stream is
//! polled, pages are fetched one at a time as the consumer drains the previous
//! one, and the stream ends right after the first error it yields.

use futures::{Stream, StreamExt, TryStreamExt, stream};
use tracing::{Instrument, Span, debug, info_span};

use crate::{
    auth::{Channel, RequestSigner},
    config::{ClientConfig, normalize_base_url},
    error::{ReportError, Result},
    records::{
        ApmOrder, CardOrder, ChargebackOrder, FraudAlert, PaypalDispute, Report, Subscription,
    },
    report::{DateRange, Paginator, ReportPage, extract_records},
    transport::{HttpTransport, Transport},
};

/// Client for the reporting API, bound to one merchant channel.
///
/// The client holds only immutable state, so one instance can serve any
/// number of concurrent queries.
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::NaiveDate;
/// use futures::TryStreamExt;
/// use solidgate_reporting::{Channel, DateRange, ReportClient};
///
/// # async fn example() -> solidgate_reporting::Result<()> {
/// let client = ReportClient::new(Channel::new("main-shop", "api_pk_123", "api_sk_456"))?;
///
/// let day = |m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let range = DateRange::new(day(4), day(5))?;
///
/// let subscriptions: Vec<_> = client.subscriptions(range).try_collect().await?;
/// for subscription in &subscriptions {
///     println!("{} {}", subscription.id, subscription.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportClient<T = HttpTransport> {
    signer: RequestSigner,
    base_url: String,
    transport: T,
}

impl ReportClient<HttpTransport> {
    /// Creates a client for the production API with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Http`](crate::ReportError::Http) if the HTTP
    /// client cannot be built.
    pub fn new(channel: Channel) -> Result<Self> {
        Self::with_config(channel, &ClientConfig::default())
    }

    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`](crate::ReportError::Config) if the
    /// configuration is invalid, or
    /// [`ReportError::Http`](crate::ReportError::Http) if the HTTP client
    /// cannot be built.
    pub fn with_config(channel: Channel, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(channel, &config.base_url, transport)
    }
}

impl<T: Transport> ReportClient<T> {
    /// Creates a client over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`](crate::ReportError::Config) if
    /// `base_url` is not an absolute HTTPS URL. Plain HTTP is accepted for
    /// loopback hosts, e.g. a local mock server.
    pub fn with_transport(channel: Channel, base_url: &str, transport: T) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { signer: RequestSigner::new(channel), base_url, transport })
    }

    /// Channel the client authenticates as.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        self.signer.channel()
    }

    /// API root, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Streams the raw pages of any report endpoint.
    ///
    /// `path` is relative to the base URL, e.g. `card-orders`.
    pub fn pages<'a>(
        &'a self,
        path: &str,
        range: DateRange,
    ) -> impl Stream<Item = Result<ReportPage>> + Send + use<'a, T> {
        let url = format!("{}{path}", self.base_url);
        Paginator::new(&self.transport, &self.signer, url).pages(range)
    }

    /// Streams the typed records of report `R`.
    ///
    /// Raw rows are validated one at a time as they are consumed. The first
    /// page that cannot be fetched, page without the items field, or row that
    /// fails validation is yielded as an error and ends the stream.
    pub fn report<R: Report>(&self, range: DateRange) -> impl Stream<Item = Result<R>> + Send + '_ {
        let span = info_span!(
            "report",
            kind = %R::KIND,
            date_from = %range.date_from(),
            date_to = %range.date_to(),
        );

        let records = self
            .pages(R::PATH, range)
            .map(|page| page.and_then(|page| extract_records(page, R::ITEMS_KEY)))
            .map_ok(|raw| {
                debug!(records = raw.len(), "page records extracted");
                stream::iter(raw.map(Ok::<_, ReportError>))
            })
            .try_flatten()
            .map(|raw| raw.and_then(R::from_raw));

        fail_fast(records, span)
    }

    /// Card orders (`card-orders`).
    pub fn card_orders(&self, range: DateRange) -> impl Stream<Item = Result<CardOrder>> + Send + '_ {
        self.report(range)
    }

    /// Orders with chargebacks (`card-orders/chargebacks`).
    pub fn chargebacks(
        &self,
        range: DateRange,
    ) -> impl Stream<Item = Result<ChargebackOrder>> + Send + '_ {
        self.report(range)
    }

    /// Alternative payment method orders (`apm-orders`).
    pub fn apm_orders(&self, range: DateRange) -> impl Stream<Item = Result<ApmOrder>> + Send + '_ {
        self.report(range)
    }

    /// Fraud alerts (`card-orders/fraud-alerts`).
    pub fn fraud_alerts(&self, range: DateRange) -> impl Stream<Item = Result<FraudAlert>> + Send + '_ {
        self.report(range)
    }

    /// Subscriptions with invoices and their orders (`subscriptions`).
    pub fn subscriptions(
        &self,
        range: DateRange,
    ) -> impl Stream<Item = Result<Subscription>> + Send + '_ {
        self.report(range)
    }

    /// PayPal disputes (`apm-orders/paypal-disputes`).
    pub fn paypal_disputes(
        &self,
        range: DateRange,
    ) -> impl Stream<Item = Result<PaypalDispute>> + Send + '_ {
        self.report(range)
    }
}

/// Ends `items` after its first error without polling it again, and runs every
/// poll inside `span`.
fn fail_fast<S, R>(items: S, span: Span) -> impl Stream<Item = Result<R>> + Send
where
    S: Stream<Item = Result<R>> + Send,
    R: Send,
{
    stream::unfold(Some(Box::pin(items)), move |state| {
        async move {
            let mut items = state?;
            let item = items.next().await?;
            if let Err(error) = &item {
                debug!(%error, "report stream stopped");
            }
            let rest = item.is_ok().then_some(items);
            Some((item, rest))
        }
        .instrument(span.clone())
    })
}
