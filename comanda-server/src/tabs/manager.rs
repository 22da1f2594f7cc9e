//! Session tab manager
//!
//! Each terminal owns an independent session of tabs; each tab owns an
//! independent cart value, so mutating one tab can never contaminate
//! another. A session always holds at least one tab. Checkout is atomic
//! with respect to the tab's cart: the session lock is held across the
//! order creation, and the cart is cleared only after the persist succeeds;
//! a failed checkout leaves the cart untouched for retry.

use crate::db::models::Order;
use crate::orders::{NewOrder, OrderError, OrderService};
use crate::utils::AppError;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{CartLine, Customer, ErrorCode, OrderType};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

/// Tab session errors
#[derive(Debug, Error)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("The last remaining tab cannot be closed")]
    CannotCloseLastTab,

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl From<TabError> for AppError {
    fn from(err: TabError) -> Self {
        match err {
            TabError::TabNotFound(id) => {
                AppError::domain(ErrorCode::TabNotFound, format!("Tab not found: {id}"))
            }
            TabError::CannotCloseLastTab => {
                AppError::domain(ErrorCode::CannotCloseLastTab, err.to_string())
            }
            TabError::Order(e) => e.into(),
        }
    }
}

/// An open tab: a not-yet-committed order session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub display_name: String,
    /// Per-session sequence hint shown on the tab header; the real order
    /// number is allocated server-side at checkout
    pub number_hint: u32,
    pub cart: Vec<CartLine>,
    pub created_at: i64,
}

/// Cart mutation applied to one named tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartOp {
    Add {
        item_id: String,
        client_price: Decimal,
        quantity: i32,
    },
    Remove {
        item_id: String,
    },
    SetQuantity {
        item_id: String,
        quantity: i32,
    },
}

/// Checkout details for a tab
#[derive(Debug, Clone, Deserialize)]
pub struct TabCheckout {
    pub order_type: OrderType,
    pub payment_method: String,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One terminal's set of tabs
struct TabSession {
    tabs: Vec<Tab>,
    active: String,
    next_hint: u32,
}

impl TabSession {
    fn new() -> Self {
        let first = Self::make_tab(1, None);
        let active = first.id.clone();
        Self {
            tabs: vec![first],
            active,
            next_hint: 2,
        }
    }

    fn make_tab(hint: u32, name: Option<String>) -> Tab {
        Tab {
            id: shared::util::short_id(),
            display_name: name.unwrap_or_else(|| format!("Tab {}", hint)),
            number_hint: hint,
            cart: Vec::new(),
            created_at: shared::util::now_millis(),
        }
    }

    fn create_tab(&mut self, name: Option<String>) -> Tab {
        let tab = Self::make_tab(self.next_hint, name);
        self.next_hint += 1;
        self.active = tab.id.clone();
        self.tabs.push(tab.clone());
        tab
    }

    /// Switch the active tab; unknown ids are a no-op
    fn switch_tab(&mut self, tab_id: &str) -> bool {
        if self.tabs.iter().any(|t| t.id == tab_id) {
            self.active = tab_id.to_string();
            true
        } else {
            false
        }
    }

    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if self.tabs.len() == 1 {
            return Err(TabError::CannotCloseLastTab);
        }
        let idx = self
            .tabs
            .iter()
            .position(|t| t.id == tab_id)
            .ok_or_else(|| TabError::TabNotFound(tab_id.to_string()))?;
        self.tabs.remove(idx);
        if self.active == tab_id {
            // Activity moves to an arbitrary survivor
            self.active = self.tabs[0].id.clone();
        }
        Ok(())
    }

    fn tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::TabNotFound(tab_id.to_string()))
    }

    fn mutate(&mut self, tab_id: &str, op: CartOp) -> Result<Tab, TabError> {
        let tab = self.tab_mut(tab_id)?;
        match op {
            CartOp::Add {
                item_id,
                client_price,
                quantity,
            } => {
                match tab.cart.iter_mut().find(|l| l.item_id == item_id) {
                    Some(line) => {
                        line.quantity += quantity;
                        line.client_price = client_price;
                    }
                    None => tab.cart.push(CartLine {
                        item_id,
                        client_price,
                        quantity,
                    }),
                }
            }
            CartOp::Remove { item_id } => {
                tab.cart.retain(|l| l.item_id != item_id);
            }
            CartOp::SetQuantity { item_id, quantity } => {
                if quantity <= 0 {
                    tab.cart.retain(|l| l.item_id != item_id);
                } else if let Some(line) = tab.cart.iter_mut().find(|l| l.item_id == item_id) {
                    line.quantity = quantity;
                }
            }
        }
        Ok(tab.clone())
    }
}

/// Tabs across all terminals of this server
///
/// Sessions are keyed by terminal id; operations on different terminals
/// never contend. Within one terminal the session mutex serializes
/// operations, which also makes checkout atomic against cart mutations.
pub struct TabManager {
    sessions: DashMap<String, Arc<Mutex<TabSession>>>,
    orders: Arc<OrderService>,
}

impl TabManager {
    pub fn new(orders: Arc<OrderService>) -> Self {
        Self {
            sessions: DashMap::new(),
            orders,
        }
    }

    /// The session for a terminal, created with one open tab on first use
    fn session(&self, terminal: &str) -> Arc<Mutex<TabSession>> {
        self.sessions
            .entry(terminal.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TabSession::new())))
            .clone()
    }

    /// All tabs of a terminal plus the active tab id
    pub async fn list_tabs(&self, terminal: &str) -> (Vec<Tab>, String) {
        let session = self.session(terminal);
        let session = session.lock().await;
        (session.tabs.clone(), session.active.clone())
    }

    /// Open a new tab; it becomes the active tab
    pub async fn create_tab(&self, terminal: &str, name: Option<String>) -> Tab {
        let session = self.session(terminal);
        let mut session = session.lock().await;
        let tab = session.create_tab(name);
        info!(terminal = %terminal, tab = %tab.id, "Tab opened");
        tab
    }

    /// Make a tab active; unknown ids are a no-op. Returns the active tab id.
    pub async fn switch_tab(&self, terminal: &str, tab_id: &str) -> String {
        let session = self.session(terminal);
        let mut session = session.lock().await;
        session.switch_tab(tab_id);
        session.active.clone()
    }

    /// Close a tab; the last remaining tab cannot be closed
    pub async fn close_tab(&self, terminal: &str, tab_id: &str) -> Result<(), TabError> {
        let session = self.session(terminal);
        let mut session = session.lock().await;
        session.close_tab(tab_id)?;
        info!(terminal = %terminal, tab = %tab_id, "Tab closed");
        Ok(())
    }

    /// Apply a cart mutation to one named tab
    pub async fn mutate_cart(
        &self,
        terminal: &str,
        tab_id: &str,
        op: CartOp,
    ) -> Result<Tab, TabError> {
        let session = self.session(terminal);
        let mut session = session.lock().await;
        session.mutate(tab_id, op)
    }

    /// Promote a tab's cart into a committed order
    ///
    /// The session lock is held across the order creation: either the order
    /// is created and the tab cleared (or closed, when others remain), or
    /// nothing changes and the operator can retry.
    pub async fn checkout(
        &self,
        terminal: &str,
        tab_id: &str,
        req: TabCheckout,
    ) -> Result<Order, TabError> {
        let session = self.session(terminal);
        let mut session = session.lock().await;

        let cart = session.tab_mut(tab_id)?.cart.clone();
        let order = self
            .orders
            .create_order(NewOrder {
                cart,
                order_type: req.order_type,
                payment_method: req.payment_method,
                customer: req.customer,
                address: req.address,
                notes: req.notes,
            })
            .await?;

        // Persist succeeded: retire the tab
        if session.tabs.len() > 1 {
            session.close_tab(tab_id)?;
        } else {
            session.tab_mut(tab_id)?.cart.clear();
        }

        info!(
            terminal = %terminal,
            tab = %tab_id,
            order_number = %order.order_number,
            "Tab checked out"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::db::DbService;
    use crate::db::models::{MenuItemCreate, SectionCreate};
    use crate::pricing::VerifyError;
    use crate::settings::SettingsService;

    /// Manager over an in-memory catalog; returns the record keys of one
    /// available and one unavailable item
    async fn manager() -> (TabManager, String, String) {
        let db = DbService::memory().await.unwrap().db;

        let catalog = Arc::new(CatalogService::new(db.clone()));
        let section = catalog
            .sections()
            .create(SectionCreate {
                slug: "mains".to_string(),
                title: "Mains".to_string(),
                description: None,
                image_ref: None,
                parent: None,
                sort_order: None,
            })
            .await
            .unwrap();
        let paella = catalog
            .items()
            .create(MenuItemCreate {
                code: "A1".to_string(),
                name: "Paella".to_string(),
                price: Decimal::new(1250, 2),
                description: None,
                section: section.key(),
                sort_order: None,
                is_available: Some(true),
            })
            .await
            .unwrap();
        let gone = catalog
            .items()
            .create(MenuItemCreate {
                code: "A2".to_string(),
                name: "Gone".to_string(),
                price: Decimal::new(900, 2),
                description: None,
                section: section.key(),
                sort_order: None,
                is_available: Some(false),
            })
            .await
            .unwrap();

        let settings = Arc::new(SettingsService::load(db.clone()).await.unwrap());
        let orders = Arc::new(OrderService::new(db, catalog.clone(), settings));
        (TabManager::new(orders), paella.key(), gone.key())
    }

    fn in_store_checkout() -> TabCheckout {
        TabCheckout {
            order_type: OrderType::InStore,
            payment_method: "cash".to_string(),
            customer: None,
            address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_session_opens_with_one_tab() {
        let (manager, _paella, _gone) = manager().await;
        let (tabs, active) = manager.list_tabs("t1").await;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, active);
        assert_eq!(tabs[0].number_hint, 1);
    }

    #[tokio::test]
    async fn test_last_tab_cannot_be_closed() {
        let (manager, _paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;

        let err = manager.close_tab("t1", &tabs[0].id).await.unwrap_err();
        assert!(matches!(err, TabError::CannotCloseLastTab));

        // With two tabs, closing succeeds and exactly one remains
        let second = manager.create_tab("t1", None).await;
        manager.close_tab("t1", &second.id).await.unwrap();
        let (tabs, active) = manager.list_tabs("t1").await;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, active);
    }

    #[tokio::test]
    async fn test_closing_active_tab_moves_activity() {
        let (manager, _paella, _gone) = manager().await;
        let second = manager.create_tab("t1", Some("Window table".to_string())).await;
        assert_eq!(second.display_name, "Window table");

        // second is active; closing it must leave a valid active tab
        manager.close_tab("t1", &second.id).await.unwrap();
        let (tabs, active) = manager.list_tabs("t1").await;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, active);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_tab_is_noop() {
        let (manager, _paella, _gone) = manager().await;
        let (_, before) = manager.list_tabs("t1").await;
        let after = manager.switch_tab("t1", "no-such-tab").await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_tabs_do_not_share_carts() {
        let (manager, _paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;
        let first = tabs[0].id.clone();
        let second = manager.create_tab("t1", None).await;

        manager
            .mutate_cart(
                "t1",
                &first,
                CartOp::Add {
                    item_id: "x".to_string(),
                    client_price: Decimal::ONE,
                    quantity: 2,
                },
            )
            .await
            .unwrap();

        let (tabs, _) = manager.list_tabs("t1").await;
        let first_cart = &tabs.iter().find(|t| t.id == first).unwrap().cart;
        let second_cart = &tabs.iter().find(|t| t.id == second.id).unwrap().cart;
        assert_eq!(first_cart.len(), 1);
        assert!(second_cart.is_empty());
    }

    #[tokio::test]
    async fn test_cart_ops() {
        let (manager, _paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;
        let tab_id = tabs[0].id.clone();

        let add = |qty: i32| CartOp::Add {
            item_id: "a".to_string(),
            client_price: Decimal::new(500, 2),
            quantity: qty,
        };

        // Add merges quantity on the same item
        manager.mutate_cart("t1", &tab_id, add(1)).await.unwrap();
        let tab = manager.mutate_cart("t1", &tab_id, add(2)).await.unwrap();
        assert_eq!(tab.cart.len(), 1);
        assert_eq!(tab.cart[0].quantity, 3);

        // SetQuantity overwrites; zero removes
        let tab = manager
            .mutate_cart(
                "t1",
                &tab_id,
                CartOp::SetQuantity {
                    item_id: "a".to_string(),
                    quantity: 5,
                },
            )
            .await
            .unwrap();
        assert_eq!(tab.cart[0].quantity, 5);

        let tab = manager
            .mutate_cart(
                "t1",
                &tab_id,
                CartOp::Remove {
                    item_id: "a".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(tab.cart.is_empty());
    }

    #[tokio::test]
    async fn test_terminals_are_isolated() {
        let (manager, _paella, _gone) = manager().await;
        manager.create_tab("front", None).await;
        manager.create_tab("front", None).await;

        let (front, _) = manager.list_tabs("front").await;
        let (bar, _) = manager.list_tabs("bar").await;
        assert_eq!(front.len(), 3);
        assert_eq!(bar.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_clears_the_only_tab() {
        let (manager, paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;
        let tab_id = tabs[0].id.clone();

        manager
            .mutate_cart(
                "t1",
                &tab_id,
                CartOp::Add {
                    item_id: paella,
                    // POS submits whatever price it had cached; the server
                    // reprices against the catalog anyway
                    client_price: Decimal::new(999, 2),
                    quantity: 2,
                },
            )
            .await
            .unwrap();

        let order = manager
            .checkout("t1", &tab_id, in_store_checkout())
            .await
            .unwrap();
        assert_eq!(order.subtotal, Decimal::new(2500, 2));
        assert!(order.lines[0].price_modified);

        // Only tab: kept open, cart emptied
        let (tabs, active) = manager.list_tabs("t1").await;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, active);
        assert!(tabs[0].cart.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_closes_tab_when_others_remain() {
        let (manager, paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;
        let first = tabs[0].id.clone();
        let second = manager.create_tab("t1", None).await;

        manager
            .mutate_cart(
                "t1",
                &second.id,
                CartOp::Add {
                    item_id: paella,
                    client_price: Decimal::new(1250, 2),
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        manager
            .checkout("t1", &second.id, in_store_checkout())
            .await
            .unwrap();

        let (tabs, active) = manager.list_tabs("t1").await;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, first);
        assert_eq!(active, first);
    }

    #[tokio::test]
    async fn test_failed_checkout_leaves_cart_untouched() {
        let (manager, _paella, gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;
        let tab_id = tabs[0].id.clone();

        manager
            .mutate_cart(
                "t1",
                &tab_id,
                CartOp::Add {
                    item_id: gone,
                    client_price: Decimal::new(900, 2),
                    quantity: 1,
                },
            )
            .await
            .unwrap();

        let err = manager
            .checkout("t1", &tab_id, in_store_checkout())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TabError::Order(OrderError::Verify(VerifyError::ItemUnavailable(_)))
        ));

        // No partial clear: the operator can fix the cart and retry
        let (tabs, _) = manager.list_tabs("t1").await;
        assert_eq!(tabs[0].cart.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_on_empty_tab_is_rejected() {
        let (manager, _paella, _gone) = manager().await;
        let (tabs, _) = manager.list_tabs("t1").await;

        let err = manager
            .checkout("t1", &tabs[0].id, in_store_checkout())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TabError::Order(OrderError::Verify(VerifyError::EmptyCart))
        ));
    }
}
