//! PayPal disputes (`apm-orders/paypal-disputes`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Report, ReportKind, de};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaypalDispute {
    #[serde(deserialize_with = "de::text")]
    pub dispute_id: String,
    #[serde(deserialize_with = "de::text")]
    pub order_id: String,
    #[serde(deserialize_with = "de::integer")]
    pub dispute_amount: i64,
    #[serde(deserialize_with = "de::text")]
    pub dispute_currency: String,
    #[serde(deserialize_with = "de::text")]
    pub reason: String,
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(deserialize_with = "de::text")]
    pub dispute_life_cycle_stage: String,
    #[serde(deserialize_with = "de::text")]
    pub dispute_channel: String,
    #[serde(with = "de::timestamp")]
    pub dispute_create_time: NaiveDateTime,
    #[serde(with = "de::timestamp")]
    pub dispute_update_time: NaiveDateTime,
    #[serde(deserialize_with = "de::text")]
    pub customer_account_id: String,
    #[serde(deserialize_with = "de::text")]
    pub customer_email: String,
    /// Kept verbatim; PayPal does not use a consistent layout here.
    #[serde(deserialize_with = "de::text")]
    pub seller_response_due_date: String,
    #[serde(with = "de::timestamp")]
    pub created_at: NaiveDateTime,
}

impl Report for PaypalDispute {
    const KIND: ReportKind = ReportKind::PaypalDisputes;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_paypal_dispute_from_raw() {
        let raw = json!({
            "dispute_id": "PP-D-1",
            "order_id": "apm-9",
            "dispute_amount": 4200,
            "dispute_currency": "USD",
            "reason": "MERCHANDISE_OR_SERVICE_NOT_RECEIVED",
            "status": "WAITING_FOR_SELLER_RESPONSE",
            "dispute_life_cycle_stage": "INQUIRY",
            "dispute_channel": "INTERNAL",
            "dispute_create_time": "2022-04-15T10:00:00.000Z",
            "dispute_update_time": "2022-04-16T10:00:00.000Z",
            "customer_account_id": "cust-4",
            "customer_email": "buyer@example.com",
            "seller_response_due_date": 20_220_425,
            "created_at": "2022-04-15 10:00:05",
        });

        let dispute = PaypalDispute::from_raw(raw).unwrap();
        assert_eq!(dispute.seller_response_due_date, "20220425");
        assert_eq!(dispute.dispute_create_time.to_string(), "2022-04-15 10:00:00");
    }

    #[test]
    fn test_paypal_dispute_requires_dispute_id() {
        let raw = json!({"order_id": "apm-9"});
        let err = PaypalDispute::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("dispute_id"));
    }
}
