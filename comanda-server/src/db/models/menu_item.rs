//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type MenuItemId = RecordId;

/// Menu item model
///
/// `price` is a currency-exact decimal; it is never stored as a binary
/// float. Orders snapshot name/price at reconciliation time, so editing or
/// deleting an item never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MenuItemId>,
    /// Short human label (e.g. "A1"), unique within its section
    pub code: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    /// Record link to the owning section
    pub section: RecordId,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Record key as a plain string, empty when not yet persisted
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    /// Owning section id (plain key or `section:key`)
    pub section: String,
    pub sort_order: Option<i32>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// API view of a menu item: record links flattened to strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_available: bool,
    pub section: String,
    pub sort_order: i32,
}

impl From<MenuItem> for MenuItemView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item
                .id
                .as_ref()
                .map(|t| t.key().to_string())
                .unwrap_or_default(),
            code: item.code,
            name: item.name,
            price: item.price,
            description: item.description,
            is_available: item.is_available,
            section: item.section.key().to_string(),
            sort_order: item.sort_order,
        }
    }
}
