//! Cart and order value types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfillment channel for an order
///
/// Determines which status-transition path applies (delivery orders pass
/// through `out-for-delivery`) and which fee rules apply (delivery fee,
/// minimum order amount).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    Pickup,
    Delivery,
    InStore,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Pickup => "pickup",
            OrderType::Delivery => "delivery",
            OrderType::InStore => "in-store",
        }
    }
}

/// Client-submitted cart line: untrusted input
///
/// `client_price` is whatever the client believes the item costs. It is
/// never used for totals; the server replaces it with the authoritative
/// catalog price during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item_id: String,
    pub client_price: Decimal,
    pub quantity: i32,
}

/// Server-reconciled cart line: the only form that reaches an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciledLine {
    pub item_id: String,
    /// Name snapshot taken at reconciliation time
    pub name: String,
    /// Authoritative catalog price at reconciliation time
    pub price: Decimal,
    pub quantity: i32,
    /// True iff the client-submitted price differed from the catalog price.
    /// Surfaced for UI transparency only; it never blocks the order.
    pub price_modified: bool,
    /// price * quantity
    pub line_total: Decimal,
}

/// Customer contact captured on an order
///
/// Required for pickup and delivery orders; optional for in-store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
}

/// Computed monetary breakdown of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
}
