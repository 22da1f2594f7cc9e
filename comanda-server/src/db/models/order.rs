//! Order Model
//!
//! An order is an audit record: the reconciled lines and all monetary fields
//! are snapshotted at creation and never mutated afterwards. `status` and
//! `updated_at` are the only fields that change, and only through the
//! compare-and-swap in the order repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Customer, OrderStatus, OrderType, ReconciledLine};
use surrealdb::RecordId;

pub type OrderId = RecordId;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// Human-readable order number, unique, allocated from the DB counter
    pub order_number: String,
    /// Reconciled line snapshot, immutable after creation
    pub lines: Vec<ReconciledLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
    pub payment_method: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Required for pickup/delivery, optional for in-store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Required iff `order_type == delivery`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// Record key as a plain string, empty when not yet persisted
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}

/// API view of an order: record id flattened, status text included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    pub order_number: String,
    pub lines: Vec<ReconciledLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub service_charge: Decimal,
    pub total: Decimal,
    pub payment_method: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Human-facing status language for this (status, order_type) pair
    pub status_title: String,
    pub status_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Order> for OrderView {
    fn from(o: Order) -> Self {
        let text = shared::order::status_text(o.status, o.order_type);
        Self {
            id: o.id.as_ref().map(|t| t.key().to_string()).unwrap_or_default(),
            order_number: o.order_number,
            lines: o.lines,
            subtotal: o.subtotal,
            tax: o.tax,
            delivery_fee: o.delivery_fee,
            service_charge: o.service_charge,
            total: o.total,
            payment_method: o.payment_method,
            order_type: o.order_type,
            status: o.status,
            status_title: text.title.to_string(),
            status_description: text.description.to_string(),
            customer: o.customer,
            address: o.address,
            notes: o.notes,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
