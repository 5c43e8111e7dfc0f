//! Alternative payment method orders (`apm-orders`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Report, ReportKind, de};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApmOrder {
    #[serde(deserialize_with = "de::text")]
    pub order_id: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(deserialize_with = "de::text")]
    pub method: String,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(deserialize_with = "de::text")]
    pub customer_email: String,
    #[serde(deserialize_with = "de::text")]
    pub ip_address: String,
    pub transactions: Vec<ApmTransaction>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub order_description: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub customer_account_id: String,
    /// Decimal string as reported by the provider, e.g. `"10.50"`.
    #[serde(default, deserialize_with = "de::option_text")]
    pub processing_amount: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub processing_currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApmTransaction {
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(deserialize_with = "de::text")]
    pub method: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub transaction_type: String,
}

impl Report for ApmOrder {
    const KIND: ReportKind = ReportKind::ApmOrders;
}
