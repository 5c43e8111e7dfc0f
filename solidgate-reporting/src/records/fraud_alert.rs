//! Fraud alerts (`card-orders/fraud-alerts`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Report, ReportKind, de};

/// A fraud report (TC40/SAFE) received from the card scheme for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAlert {
    #[serde(deserialize_with = "de::text")]
    pub order_id: String,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "de::integer")]
    pub fraud_amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub fraud_currency: String,
    #[serde(deserialize_with = "de::integer")]
    pub fraud_amount_usd: i64,
    #[serde(deserialize_with = "de::text")]
    pub fraud_type: String,
    #[serde(deserialize_with = "de::text")]
    pub card_scheme: String,
    #[serde(with = "de::timestamp")]
    pub fraud_report_date: NaiveDateTime,
    #[serde(deserialize_with = "de::text")]
    pub reason_code_description: String,
}

impl Report for FraudAlert {
    const KIND: ReportKind = ReportKind::FraudAlerts;
}
