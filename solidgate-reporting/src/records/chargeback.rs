//! Chargebacks against card orders (`card-orders/chargebacks`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Report, ReportKind, de};

/// A card order together with the chargebacks opened on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargebackOrder {
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
    pub chargebacks: Vec<Chargeback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chargeback {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub dispute_date: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub settlement_date: NaiveDateTime,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub chargeback_type: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(deserialize_with = "de::text")]
    pub reason_group: String,
    #[serde(deserialize_with = "de::text")]
    pub reason_code: String,
    #[serde(deserialize_with = "de::text")]
    pub reason_description: String,
    #[serde(default, deserialize_with = "de::option_integer")]
    pub finance_fee_amount: Option<i64>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub finance_fee_currency: Option<String>,
    pub flows: Vec<Flow>,
}

/// One step of a chargeback's lifecycle (first chargeback, representment,
/// arbitration...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::integer")]
    pub amount: i64,
    #[serde(default, deserialize_with = "de::option_integer")]
    pub dispute_amount: Option<i64>,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub flow_type: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(with = "de::timestamp")]
    pub date: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub settlement_date: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(default, with = "de::option_timestamp")]
    pub deadline_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub arn_code: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub currency: String,
    #[serde(default, deserialize_with = "de::option_integer")]
    pub finance_fee_amount: Option<i64>,
    #[serde(default, deserialize_with = "de::option_text")]
    pub finance_fee_currency: Option<String>,
}

impl Report for ChargebackOrder {
    const KIND: ReportKind = ReportKind::Chargebacks;
}
