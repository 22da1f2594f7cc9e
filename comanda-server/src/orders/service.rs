//! Order service: creation and lifecycle transitions
//!
//! Creation runs the full integrity pipeline: reconcile the untrusted cart
//! against the catalog index, compute totals from current settings, allocate
//! an order number from the atomic counter, and persist the immutable
//! snapshot. Transitions are compare-and-swapped on the previously read
//! status; a lost race is a conflict, never a silent overwrite.

use crate::catalog::CatalogService;
use crate::db::models::Order;
use crate::db::repository::{OrderRepository, RepoError};
use crate::pricing::{self, CheckoutError, VerifyError};
use crate::settings::SettingsService;
use crate::utils::AppError;
use shared::{CartLine, Customer, ErrorCode, OrderStatus, OrderType};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;
use tracing::info;

/// Order domain errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is already {0}")]
    AlreadyTerminal(OrderStatus),

    #[error("Order status changed concurrently (expected {expected})")]
    StaleStatus { expected: OrderStatus },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Verify(e) => e.into(),
            OrderError::Checkout(e) => e.into(),
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::NotFound(msg) => {
                AppError::domain(ErrorCode::OrderNotFound, format!("Order not found: {msg}"))
            }
            OrderError::InvalidTransition { .. } => {
                AppError::domain(ErrorCode::InvalidTransition, err.to_string())
            }
            OrderError::AlreadyTerminal(_) => {
                AppError::domain(ErrorCode::AlreadyTerminal, err.to_string())
            }
            OrderError::StaleStatus { .. } => {
                AppError::domain(ErrorCode::StaleStatus, err.to_string())
            }
            OrderError::Repo(e) => e.into(),
        }
    }
}

/// Checkout request after the HTTP layer has shaped it
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub cart: Vec<CartLine>,
    pub order_type: OrderType,
    pub payment_method: String,
    pub customer: Option<Customer>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

pub struct OrderService {
    repo: OrderRepository,
    catalog: Arc<CatalogService>,
    settings: Arc<SettingsService>,
}

impl OrderService {
    pub fn new(
        db: Surreal<Db>,
        catalog: Arc<CatalogService>,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            repo: OrderRepository::new(db),
            catalog,
            settings,
        }
    }

    pub fn repo(&self) -> &OrderRepository {
        &self.repo
    }

    /// Create an order from an untrusted cart
    pub async fn create_order(&self, req: NewOrder) -> Result<Order, OrderError> {
        validate_customer(&req)?;

        let index = self.catalog.index().await?;
        let lines = pricing::reconcile(&req.cart, &index)?;
        let settings = self.settings.get();
        let totals = pricing::compute_totals(&lines, &settings, req.order_type)?;

        let order_number = self.repo.next_order_number().await?;
        let now = shared::util::now_millis();

        let order = Order {
            id: None,
            order_number,
            lines,
            subtotal: totals.subtotal,
            tax: totals.tax,
            delivery_fee: totals.delivery_fee,
            service_charge: totals.service_charge,
            total: totals.total,
            payment_method: req.payment_method,
            order_type: req.order_type,
            status: OrderStatus::Pending,
            customer: req.customer,
            address: req.address,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(order).await?;
        info!(
            order_number = %created.order_number,
            order_type = %created.order_type.as_str(),
            total = %created.total,
            "Order created"
        );
        Ok(created)
    }

    /// Apply a staff-requested status transition
    ///
    /// `expected` is the status the caller last read; when omitted, the
    /// current stored status is used. Either way the persisted update is
    /// conditioned on it, so two concurrent requests against the same
    /// expected status produce exactly one success and one conflict.
    pub async fn transition(
        &self,
        id: &str,
        requested: OrderStatus,
        expected: Option<OrderStatus>,
    ) -> Result<Order, OrderError> {
        let order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        let expected = expected.unwrap_or(order.status);

        if !expected.can_transition(requested, order.order_type) {
            if expected.is_terminal() {
                return Err(OrderError::AlreadyTerminal(expected));
            }
            return Err(OrderError::InvalidTransition {
                from: expected,
                to: requested,
            });
        }

        let updated = self
            .repo
            .update_status_cas(id, expected, requested)
            .await?
            .ok_or(OrderError::StaleStatus { expected })?;

        info!(
            order_number = %updated.order_number,
            from = %expected,
            to = %requested,
            "Order status transitioned"
        );
        Ok(updated)
    }

    /// Cancel an order from any non-terminal state
    pub async fn cancel(&self, id: &str, expected: Option<OrderStatus>) -> Result<Order, OrderError> {
        self.transition(id, OrderStatus::Cancelled, expected).await
    }
}

/// Customer contact is required for pickup/delivery, address iff delivery
fn validate_customer(req: &NewOrder) -> Result<(), OrderError> {
    match req.order_type {
        OrderType::InStore => Ok(()),
        OrderType::Pickup | OrderType::Delivery => {
            let customer = req
                .customer
                .as_ref()
                .ok_or_else(|| OrderError::Validation("Customer contact is required".into()))?;
            if customer.name.trim().is_empty() {
                return Err(OrderError::Validation("Customer name is required".into()));
            }
            if customer.phone.trim().is_empty() {
                return Err(OrderError::Validation("Customer phone is required".into()));
            }
            if req.order_type == OrderType::Delivery
                && req
                    .address
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
            {
                return Err(OrderError::Validation(
                    "Delivery orders require an address".into(),
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_req(order_type: OrderType) -> NewOrder {
        NewOrder {
            cart: vec![],
            order_type,
            payment_method: "card".to_string(),
            customer: Some(Customer {
                name: "Ada".to_string(),
                email: None,
                phone: "555-0100".to_string(),
            }),
            address: None,
            notes: None,
        }
    }

    #[test]
    fn test_in_store_needs_no_customer() {
        let mut req = base_req(OrderType::InStore);
        req.customer = None;
        assert!(validate_customer(&req).is_ok());
    }

    #[test]
    fn test_pickup_requires_contact() {
        let mut req = base_req(OrderType::Pickup);
        assert!(validate_customer(&req).is_ok());

        req.customer = None;
        assert!(validate_customer(&req).is_err());
    }

    #[test]
    fn test_delivery_requires_address() {
        let mut req = base_req(OrderType::Delivery);
        assert!(validate_customer(&req).is_err());

        req.address = Some("Calle Mayor 1".to_string());
        assert!(validate_customer(&req).is_ok());

        req.address = Some("   ".to_string());
        assert!(validate_customer(&req).is_err());
    }
}
