//! Report query plumbing: request bodies, pages, paging and record extraction.
//!
//! A query is a [`DateRange`] sent to one report endpoint. The API answers
//! with a [`ReportPage`]; the [`Paginator`] keeps asking for the next page
//! while the page's `metadata.next_page_iterator` is non-null, and
//! [`extract_records`] pulls the raw rows out of each page.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ReportError, Result};

pub mod extract;
pub mod paginator;

pub use extract::{RawRecords, extract_records};
pub use paginator::Paginator;

/// Timestamp format used on the wire, both in request bodies and in reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time window of a report query.
///
/// Timestamps are timezone-naive; the API interprets them in the merchant's
/// configured zone.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use solidgate_reporting::DateRange;
///
/// let from = NaiveDate::from_ymd_opt(2022, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let to = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// assert!(DateRange::new(from, to).is_ok());
/// assert!(DateRange::new(to, from).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    date_from: NaiveDateTime,
    date_to: NaiveDateTime,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `date_from` is after `date_to`.
    pub fn new(date_from: NaiveDateTime, date_to: NaiveDateTime) -> Result<Self> {
        if date_from > date_to {
            return Err(ReportError::InvalidDateRange(format!(
                "date_from {date_from} is after date_to {date_to}"
            )));
        }
        Ok(Self { date_from, date_to })
    }

    /// Start of the range.
    #[must_use]
    pub const fn date_from(&self) -> NaiveDateTime {
        self.date_from
    }

    /// End of the range.
    #[must_use]
    pub const fn date_to(&self) -> NaiveDateTime {
        self.date_to
    }
}

/// JSON body of a report request.
///
/// Field order is part of the signed payload and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReportRequest {
    date_from: String,
    date_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_page_iterator: Option<String>,
}

impl ReportRequest {
    pub(crate) fn new(range: DateRange) -> Self {
        Self {
            date_from: range.date_from.format(TIMESTAMP_FORMAT).to_string(),
            date_to: range.date_to.format(TIMESTAMP_FORMAT).to_string(),
            next_page_iterator: None,
        }
    }

    pub(crate) fn with_cursor(self, cursor: String) -> Self {
        Self { next_page_iterator: Some(cursor), ..self }
    }

    pub(crate) fn cursor(&self) -> Option<&str> {
        self.next_page_iterator.as_deref()
    }
}

/// One response body from a report endpoint.
///
/// Key order is preserved exactly as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage(Map<String, Value>);

impl ReportPage {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MalformedPage`] if the body is not a JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use solidgate_reporting::ReportPage;
    ///
    /// let page = ReportPage::from_slice(br#"{"metadata": {"next_page_iterator": "abc"}, "orders": []}"#)?;
    /// assert_eq!(page.next_page_iterator()?, Some("abc"));
    ///
    /// assert!(ReportPage::from_slice(b"[]").is_err());
    /// # Ok::<(), solidgate_reporting::ReportError>(())
    /// ```
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ReportError::MalformedPage(format!("response is not valid JSON: {e}")))?;
        Self::try_from(value)
    }

    /// Cursor for the following page, `None` on the last page.
    ///
    /// Only an explicit `null` ends the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MalformedPage`] if `metadata` or its
    /// `next_page_iterator` is missing, or the cursor is neither a string nor
    /// null.
    pub fn next_page_iterator(&self) -> Result<Option<&str>> {
        let metadata = self
            .0
            .get("metadata")
            .and_then(Value::as_object)
            .ok_or_else(|| ReportError::MalformedPage("missing `metadata` object".to_owned()))?;

        match metadata.get("next_page_iterator") {
            None => Err(ReportError::MalformedPage(
                "missing `metadata.next_page_iterator`".to_owned(),
            )),
            Some(Value::Null) => Ok(None),
            Some(Value::String(cursor)) => Ok(Some(cursor.as_str())),
            Some(other) => Err(ReportError::MalformedPage(format!(
                "`next_page_iterator` must be a string or null, got {}",
                json_type(other)
            ))),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Consumes the page, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub(crate) fn take(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }
}

impl TryFrom<Value> for ReportPage {
    type Error = ReportError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ReportError::MalformedPage(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }
}

pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
