//! Record extraction from report pages.
//!
//! Depending on the endpoint, the API returns a page's rows either as an
//! array or as an object keyed by record id. [`RawRecords`] hides the
//! difference so that nothing downstream has to care.

use std::fmt;

use serde_json::{Value, map};

use crate::{
    error::{ReportError, Result},
    report::{ReportPage, json_type},
};

/// Raw records of one collection, in the order the server emitted them.
pub enum RawRecords {
    /// Values of a keyed object.
    Keyed(map::IntoIter),
    /// Elements of an array.
    Listed(std::vec::IntoIter<Value>),
}

impl RawRecords {
    /// Normalizes an object or array into a record sequence.
    ///
    /// Any other shape is handed back unchanged as the error.
    ///
    /// # Errors
    ///
    /// Returns the original value if it is neither an object nor an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use solidgate_reporting::report::RawRecords;
    ///
    /// let keyed: Vec<_> = RawRecords::from_value(json!({"b": 2, "a": 1})).unwrap().collect();
    /// assert_eq!(keyed, [json!(2), json!(1)]);
    ///
    /// assert!(RawRecords::from_value(json!("nope")).is_err());
    /// ```
    pub fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self::Keyed(map.into_iter())),
            Value::Array(items) => Ok(Self::Listed(items.into_iter())),
            other => Err(other),
        }
    }
}

impl Iterator for RawRecords {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Keyed(entries) => entries.next().map(|(_, value)| value),
            Self::Listed(items) => items.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Keyed(entries) => entries.size_hint(),
            Self::Listed(items) => items.size_hint(),
        }
    }
}

impl ExactSizeIterator for RawRecords {}

impl fmt::Debug for RawRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (shape, remaining) = match self {
            Self::Keyed(entries) => ("keyed", entries.len()),
            Self::Listed(items) => ("listed", items.len()),
        };
        f.debug_struct("RawRecords")
            .field("shape", &shape)
            .field("remaining", &remaining)
            .finish()
    }
}

/// Takes the records stored under `key` out of a page.
///
/// # Errors
///
/// - [`ReportError::MissingKey`] if the page has no `key` field
/// - [`ReportError::MalformedPage`] if the field is neither an object nor an array
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use solidgate_reporting::{ReportError, ReportPage, report::extract_records};
///
/// let page = ReportPage::try_from(json!({
///     "metadata": {"next_page_iterator": null},
///     "alerts": [{"order_id": "a"}, {"order_id": "b"}],
/// }))?;
///
/// let records: Vec<_> = extract_records(page.clone(), "alerts")?.collect();
/// assert_eq!(records.len(), 2);
///
/// assert!(matches!(extract_records(page, "orders"), Err(ReportError::MissingKey { .. })));
/// # Ok::<(), ReportError>(())
/// ```
pub fn extract_records(mut page: ReportPage, key: &str) -> Result<RawRecords> {
    let items = page.take(key).ok_or_else(|| ReportError::MissingKey { key: key.to_owned() })?;

    RawRecords::from_value(items).map_err(|other| {
        ReportError::MalformedPage(format!(
            "`{key}` must be an object or an array, got {}",
            json_type(&other)
        ))
    })
}
