//! Typed report records.
//!
//! Each report endpoint returns rows of one kind. A record type implements
//! [`Report`], which ties it to its endpoint path and to the page field that
//! holds its rows, and knows how to build itself from a raw JSON row.
//!
//! | Kind | Record | Path | Items key |
//! |---|---|---|---|
//! | `card_orders` | [`CardOrder`] | `card-orders` | `orders` |
//! | `chargebacks` | [`ChargebackOrder`] | `card-orders/chargebacks` | `orders` |
//! | `apm_orders` | [`ApmOrder`] | `apm-orders` | `orders` |
//! | `fraud_alerts` | [`FraudAlert`] | `card-orders/fraud-alerts` | `alerts` |
//! | `subscriptions` | [`Subscription`] | `subscriptions` | `subscriptions` |
//! | `paypal_disputes` | [`PaypalDispute`] | `apm-orders/paypal-disputes` | `disputes` |

use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::{ReportError, Result};

// Record fields carry the API's own names and are not documented one by one.
#[allow(missing_docs)]
pub mod apm_order;
#[allow(missing_docs)]
pub mod card_order;
#[allow(missing_docs)]
pub mod chargeback;
pub(crate) mod de;
#[allow(missing_docs)]
pub mod fraud_alert;
#[allow(missing_docs)]
pub mod paypal_dispute;
#[allow(missing_docs)]
pub mod subscription;

pub use apm_order::{ApmOrder, ApmTransaction};
pub use card_order::{BillingDetails, Card, CardOrder, CardTransaction};
pub use chargeback::{Chargeback, ChargebackOrder, Flow};
pub use fraud_alert::FraudAlert;
pub use paypal_dispute::PaypalDispute;
pub use subscription::{Customer, Invoice, Product, Subscription, SubscriptionOrder};

/// The six reports exposed by the API.
///
/// # Examples
///
/// ```
/// use solidgate_reporting::ReportKind;
///
/// let kind: ReportKind = "fraud_alerts".parse()?;
/// assert_eq!(kind.path(), "card-orders/fraud-alerts");
/// assert_eq!(kind.items_key(), "alerts");
/// assert_eq!(kind.to_string(), "fraud_alerts");
/// # Ok::<(), solidgate_reporting::records::UnknownReportKind>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Card payment orders.
    CardOrders,
    /// Card orders that received chargebacks.
    Chargebacks,
    /// Alternative payment method orders.
    ApmOrders,
    /// Fraud alerts raised against card orders.
    FraudAlerts,
    /// Subscriptions with their invoices.
    Subscriptions,
    /// PayPal disputes.
    PaypalDisputes,
}

impl ReportKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 6] = [
        Self::CardOrders,
        Self::Chargebacks,
        Self::ApmOrders,
        Self::FraudAlerts,
        Self::Subscriptions,
        Self::PaypalDisputes,
    ];

    /// Endpoint path relative to the API root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CardOrders => "card-orders",
            Self::Chargebacks => "card-orders/chargebacks",
            Self::ApmOrders => "apm-orders",
            Self::FraudAlerts => "card-orders/fraud-alerts",
            Self::Subscriptions => "subscriptions",
            Self::PaypalDisputes => "apm-orders/paypal-disputes",
        }
    }

    /// Page field holding the rows.
    #[must_use]
    pub const fn items_key(self) -> &'static str {
        match self {
            Self::CardOrders | Self::Chargebacks | Self::ApmOrders => "orders",
            Self::FraudAlerts => "alerts",
            Self::Subscriptions => "subscriptions",
            Self::PaypalDisputes => "disputes",
        }
    }

    /// Snake-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CardOrders => "card_orders",
            Self::Chargebacks => "chargebacks",
            Self::ApmOrders => "apm_orders",
            Self::FraudAlerts => "fraud_alerts",
            Self::Subscriptions => "subscriptions",
            Self::PaypalDisputes => "paypal_disputes",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`ReportKind`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report kind `{0}`")]
pub struct UnknownReportKind(pub String);

impl FromStr for ReportKind {
    type Err = UnknownReportKind;

    /// Accepts snake-case names and, for convenience, the kebab-case spelling
    /// (`paypal-disputes`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownReportKind(s.to_owned()))
    }
}

/// A record type served by one report endpoint.
pub trait Report: DeserializeOwned + Send + 'static {
    /// Which report this record belongs to.
    const KIND: ReportKind;

    /// Endpoint path relative to the API root.
    const PATH: &'static str = Self::KIND.path();

    /// Page field holding the rows.
    const ITEMS_KEY: &'static str = Self::KIND.items_key();

    /// Builds a record from one raw row.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] if a required field is missing or
    /// has the wrong type.
    fn from_raw(raw: Value) -> Result<Self> {
        serde_json::from_value(raw).map_err(|source| ReportError::Validation { kind: Self::KIND, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table() {
        let table: Vec<_> = ReportKind::ALL.iter().map(|k| (k.path(), k.items_key())).collect();
        assert_eq!(
            table,
            [
                ("card-orders", "orders"),
                ("card-orders/chargebacks", "orders"),
                ("apm-orders", "orders"),
                ("card-orders/fraud-alerts", "alerts"),
                ("subscriptions", "subscriptions"),
                ("apm-orders/paypal-disputes", "disputes"),
            ]
        );
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.to_string().parse::<ReportKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_parse_is_lenient_about_spelling() {
        assert_eq!("PayPal-Disputes".parse::<ReportKind>(), Ok(ReportKind::PaypalDisputes));
        assert_eq!(" card_orders ".parse::<ReportKind>(), Ok(ReportKind::CardOrders));
    }

    #[test]
    fn test_kind_parse_unknown() {
        let err = "refunds".parse::<ReportKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown report kind `refunds`");
    }

    #[test]
    fn test_record_constants_follow_kind() {
        assert_eq!(CardOrder::PATH, "card-orders");
        assert_eq!(ChargebackOrder::ITEMS_KEY, "orders");
        assert_eq!(FraudAlert::ITEMS_KEY, "alerts");
        assert_eq!(PaypalDispute::PATH, "apm-orders/paypal-disputes");
        assert_eq!(Subscription::KIND, ReportKind::Subscriptions);
        assert_eq!(ApmOrder::KIND.path(), "apm-orders");
    }
}
