//! Card payment orders (`card-orders`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Report, ReportKind, de};

/// A card payment order with its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOrder {
    #[serde(deserialize_with = "de::text")]
    pub order_id: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub order_type: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(default, deserialize_with = "de::option_integer")]
    pub processing_amount: Option<i64>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub processing_currency: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub traffic_source: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub order_description: String,
    #[serde(deserialize_with = "de::text")]
    pub customer_account_id: String,
    #[serde(deserialize_with = "de::text")]
    pub customer_email: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub customer_first_name: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub customer_last_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub geo_country: String,
    #[serde(deserialize_with = "de::text")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub error_code: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub platform: String,
    pub fraudulent: bool,
    pub is_secured: bool,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub updated_at: NaiveDateTime,
    pub transactions: Vec<CardTransaction>,
}

/// One operation (auth, settle, refund...) on a card order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTransaction {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub operation: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub descriptor: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub refund_reason: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub refund_reason_code: Option<String>,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(deserialize_with = "de::integer")]
    pub finance_fee_amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub finance_fee_currency: String,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub billing_details: Option<BillingDetails>,
}

/// Masked card data attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, deserialize_with = "de::option_text")]
    pub bank: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub bin: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub card_holder: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub country: Option<String>,
    /// Masked PAN.
    #[serde(deserialize_with = "de::text")]
    pub number: String,
    #[serde(deserialize_with = "de::integer")]
    pub card_exp_year: i64,
    #[serde(deserialize_with = "de::text")]
    pub card_exp_month: String,
    #[serde(default, deserialize_with = "de::option_text")]
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    #[serde(deserialize_with = "de::text")]
    pub address: String,
    #[serde(deserialize_with = "de::text")]
    pub zip: String,
    #[serde(deserialize_with = "de::text")]
    pub country: String,
    #[serde(deserialize_with = "de::text")]
    pub city: String,
    #[serde(deserialize_with = "de::text")]
    pub state: String,
}

impl Report for CardOrder {
    const KIND: ReportKind = ReportKind::CardOrders;
}
