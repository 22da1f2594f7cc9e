//! Settings Model (Singleton)
//!
//! One record per installation. Read by every pricing computation; writes
//! take effect for subsequent orders only: historical orders keep their
//! snapshotted totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Settings entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Flat tax percentage applied to the subtotal (e.g. 8.25)
    pub tax_percentage: Decimal,
    /// Flat fee added to delivery orders
    pub delivery_fee: Decimal,
    /// Optional flat service charge added to every order
    pub service_charge: Decimal,
    /// Delivery orders below this subtotal are rejected
    pub minimum_order_amount: Decimal,
    pub enable_delivery: bool,
    // Restaurant metadata
    pub restaurant_name: String,
    pub restaurant_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_phone: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: None,
            tax_percentage: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            service_charge: Decimal::ZERO,
            minimum_order_amount: Decimal::ZERO,
            enable_delivery: true,
            restaurant_name: String::new(),
            restaurant_address: String::new(),
            restaurant_phone: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// API view of the settings singleton: record id stripped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsView {
    pub tax_percentage: Decimal,
    pub delivery_fee: Decimal,
    pub service_charge: Decimal,
    pub minimum_order_amount: Decimal,
    pub enable_delivery: bool,
    pub restaurant_name: String,
    pub restaurant_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_phone: Option<String>,
    pub updated_at: Option<i64>,
}

impl From<Settings> for SettingsView {
    fn from(s: Settings) -> Self {
        Self {
            tax_percentage: s.tax_percentage,
            delivery_fee: s.delivery_fee,
            service_charge: s.service_charge,
            minimum_order_amount: s.minimum_order_amount,
            enable_delivery: s.enable_delivery,
            restaurant_name: s.restaurant_name,
            restaurant_address: s.restaurant_address,
            restaurant_phone: s.restaurant_phone,
            updated_at: s.updated_at,
        }
    }
}

/// Update settings payload: partial merge
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_order_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_phone: Option<String>,
}
