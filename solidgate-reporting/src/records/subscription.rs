//! Subscriptions (`subscriptions`).
//!
//! Subscription rows nest two keyed collections: `invoices` maps invoice id to
//! invoice, and each invoice's `orders` maps order id to order. Both are
//! flattened into lists, in server order, before the row is deserialized.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize, de::Error as _};
use serde_json::{Map, Value};

use super::{Report, ReportKind, de};
use crate::{
    error::{ReportError, Result},
    report::RawRecords,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(with = "de::timestamp")]
    pub started_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub expired_at: NaiveDateTime,
    #[serde(default, with = "de::option_timestamp")]
    pub next_charge_at: Option<NaiveDateTime>,
    #[serde(default, with = "de::option_timestamp")]
    pub cancelled_at: Option<NaiveDateTime>,
    pub trial: bool,
    #[serde(default, deserialize_with = "de::option_text")]
    pub cancel_code: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub cancel_message: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub payment_type: String,
    pub customer: Customer,
    pub product: Product,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de::text")]
    pub customer_account_id: String,
    #[serde(deserialize_with = "de::text")]
    pub customer_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    pub trial: bool,
    #[serde(default, deserialize_with = "de::option_text")]
    pub payment_action: Option<String>,
    /// Trial length; whole minutes on the wire.
    #[serde(default, with = "de::option_minutes")]
    pub trial_period: Option<TimeDelta>,
}

/// One billing period of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(default, with = "de::option_timestamp")]
    pub billing_period_started_at: Option<NaiveDateTime>,
    #[serde(default, with = "de::option_timestamp")]
    pub billing_period_ended_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "de::integer")]
    pub subscription_term_number: i64,
    pub orders: Vec<SubscriptionOrder>,
}

/// A charge attempt made for an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOrder {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub processed_at: NaiveDateTime,
    #[serde(default, deserialize_with = "de::option_text")]
    pub failed_reason: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub operation: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub retry_attempt: Option<String>,
}

impl Report for Subscription {
    const KIND: ReportKind = ReportKind::Subscriptions;

    fn from_raw(raw: Value) -> Result<Self> {
        let invalid = |source| ReportError::Validation { kind: Self::KIND, source };

        let raw = flatten_subscription(raw).map_err(invalid)?;
        serde_json::from_value(raw).map_err(invalid)
    }
}

/// Rewrites `invoices` and every invoice's `orders` from keyed objects into
/// arrays. Collections that are already arrays pass through.
fn flatten_subscription(raw: Value) -> serde_json::Result<Value> {
    let Value::Object(mut subscription) = raw else {
        return Ok(raw);
    };

    let invoices = take_collection(&mut subscription, "invoices")?
        .map(|invoice| -> serde_json::Result<Value> {
            let Value::Object(mut invoice) = invoice else {
                return Ok(invoice);
            };
            let orders = take_collection(&mut invoice, "orders")?.collect();
            invoice.insert("orders".to_owned(), Value::Array(orders));
            Ok(Value::Object(invoice))
        })
        .collect::<serde_json::Result<Vec<_>>>()?;

    subscription.insert("invoices".to_owned(), Value::Array(invoices));
    Ok(Value::Object(subscription))
}

fn take_collection(record: &mut Map<String, Value>, key: &'static str) -> serde_json::Result<RawRecords> {
    let value = record.remove(key).ok_or_else(|| serde_json::Error::missing_field(key))?;

    RawRecords::from_value(value).map_err(|other| {
        serde_json::Error::custom(format_args!(
            "`{key}` must be an object or an array, got {}",
            crate::report::json_type(&other)
        ))
    })
}
