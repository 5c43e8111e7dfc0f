//! Cursor-driven paging over one report endpoint.

use std::fmt;

use futures::{Stream, stream};
use tracing::{debug, instrument};

use crate::{
    auth::{RequestSigner, encode_body},
    error::{ReportError, Result},
    report::{DateRange, ReportPage, ReportRequest},
    transport::{PostRequest, Transport},
};

/// Fetches the pages of one report query, following `next_page_iterator`.
///
/// Pages are fetched lazily and strictly one after another: the next request
/// is only sent once the consumer polls past the current page, and no request
/// is sent after a page whose cursor is null.
///
/// # Examples
///
/// ```rust,no_run
/// use futures::TryStreamExt;
/// use solidgate_reporting::{
///     DateRange,
///     auth::{Channel, RequestSigner},
///     report::Paginator,
///     transport::HttpTransport,
/// };
///
/// # async fn example(range: DateRange) -> solidgate_reporting::Result<()> {
/// let transport = HttpTransport::new()?;
/// let signer = RequestSigner::new(Channel::new("shop", "api_pk_123", "api_sk_456"));
///
/// let url = "https://reports.solidgate.com/api/v1/card-orders".to_owned();
/// let pages: Vec<_> = Paginator::new(&transport, &signer, url).pages(range).try_collect().await?;
/// println!("{} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub struct Paginator<'a, T> {
    transport: &'a T,
    signer: &'a RequestSigner,
    url: String,
}

type Step<'a, T> = (ReportPage, (Paginator<'a, T>, Option<ReportRequest>));

impl<'a, T: Transport> Paginator<'a, T> {
    /// Creates a paginator for an absolute endpoint URL.
    #[must_use]
    pub const fn new(transport: &'a T, signer: &'a RequestSigner, url: String) -> Self {
        Self { transport, signer, url }
    }

    /// Endpoint this paginator queries.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Streams every page for `range`, in server order.
    ///
    /// The stream ends after the first error.
    pub fn pages(self, range: DateRange) -> impl Stream<Item = Result<ReportPage>> + Send + 'a {
        stream::try_unfold((self, Some(ReportRequest::new(range))), |(paginator, request)| {
            paginator.step(request)
        })
    }

    async fn step(self, request: Option<ReportRequest>) -> Result<Option<Step<'a, T>>> {
        let Some(request) = request else {
            return Ok(None);
        };

        let page = self.fetch_page(&request).await?;
        let next = page.next_page_iterator()?.map(|cursor| request.with_cursor(cursor.to_owned()));

        debug!(url = %self.url, has_more = next.is_some(), "report page fetched");

        Ok(Some((page, (self, next))))
    }

    #[instrument(
        skip(self, request),
        fields(url = %self.url, protocol = self.transport.protocol_name(), cursor = request.cursor().is_some())
    )]
    async fn fetch_page(&self, request: &ReportRequest) -> Result<ReportPage> {
        let body = encode_body(request)?;
        let signature = self.signer.sign(&body)?;

        let response = self
            .transport
            .post(PostRequest {
                url: &self.url,
                merchant: self.signer.merchant(),
                signature: &signature,
                body: &body,
            })
            .await?;

        if !response.is_success() {
            return Err(ReportError::RequestFailed {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        ReportPage::from_slice(&response.body)
    }
}

impl<T> fmt::Debug for Paginator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator").field("url", &self.url).finish_non_exhaustive()
    }
}
