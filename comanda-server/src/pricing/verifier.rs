//! Price verification: the core correctness fix
//!
//! Clients mutate carts locally and cannot be trusted at checkout: every
//! submitted cart is re-priced here against the authoritative catalog index
//! before any total is computed or any order is created.

use crate::catalog::CatalogIndex;
use crate::db::models::Settings;
use crate::pricing::money::{percentage_of, round_money};
use crate::utils::AppError;
use rust_decimal::Decimal;
use shared::{CartLine, ErrorCode, OrderTotals, OrderType, ReconciledLine};
use thiserror::Error;

/// Reconciliation failures
///
/// `EmptyCart` and `InvalidQuantity` are validation errors the caller can
/// self-correct. `ItemNotFound`/`ItemUnavailable` are integrity errors: the
/// client's view of the catalog is stale and should be refreshed.
#[derive(Debug, Error, PartialEq)]
pub enum VerifyError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Quantity for item {item_id} must be a positive integer, got {quantity}")]
    InvalidQuantity { item_id: String, quantity: i32 },

    #[error("Item {0} not found in the catalog")]
    ItemNotFound(String),

    #[error("Item {0} is currently unavailable")]
    ItemUnavailable(String),
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        let code = match &err {
            VerifyError::EmptyCart => ErrorCode::EmptyCart,
            VerifyError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            VerifyError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            VerifyError::ItemUnavailable(_) => ErrorCode::ItemUnavailable,
        };
        AppError::domain(code, err.to_string())
    }
}

/// Business-rule rejections during totals computation
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Delivery orders require a subtotal of at least {required}, got {actual}")]
    BelowMinimumOrder { required: Decimal, actual: Decimal },

    #[error("Delivery is currently disabled")]
    DeliveryDisabled,
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        let code = match &err {
            CheckoutError::BelowMinimumOrder { .. } => ErrorCode::BelowMinimumOrder,
            CheckoutError::DeliveryDisabled => ErrorCode::DeliveryDisabled,
        };
        AppError::domain(code, err.to_string())
    }
}

/// Re-price a client-submitted cart against the catalog index
///
/// All-or-nothing: the first unresolvable line fails the whole cart, because
/// a partially priced order is a worse failure mode than a rejected
/// checkout. The authoritative price replaces the client price
/// unconditionally; `price_modified` records a mismatch for UI transparency
/// but never blocks the order. Unavailable items, by contrast, are a hard
/// gate.
pub fn reconcile(
    cart: &[CartLine],
    index: &CatalogIndex,
) -> Result<Vec<ReconciledLine>, VerifyError> {
    if cart.is_empty() {
        return Err(VerifyError::EmptyCart);
    }

    let mut lines = Vec::with_capacity(cart.len());
    for line in cart {
        if line.quantity <= 0 {
            return Err(VerifyError::InvalidQuantity {
                item_id: line.item_id.clone(),
                quantity: line.quantity,
            });
        }

        let item = index
            .lookup(&line.item_id)
            .ok_or_else(|| VerifyError::ItemNotFound(line.item_id.clone()))?;

        if !item.is_available {
            return Err(VerifyError::ItemUnavailable(line.item_id.clone()));
        }

        let price_modified = line.client_price != item.price;
        if price_modified {
            tracing::info!(
                item = %line.item_id,
                client_price = %line.client_price,
                authoritative = %item.price,
                "Client price differs from catalog; repriced"
            );
        }

        lines.push(ReconciledLine {
            item_id: line.item_id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: line.quantity,
            price_modified,
            line_total: round_money(item.price * Decimal::from(line.quantity)),
        });
    }

    Ok(lines)
}

/// Compute the monetary breakdown for a reconciled cart
///
/// - subtotal: exact decimal sum of line totals
/// - tax: `subtotal * tax_percentage / 100`, rounded half-up
/// - delivery fee: only for delivery orders
/// - service charge: flat, when configured
///
/// The minimum-order check applies to delivery only, never pickup/in-store.
pub fn compute_totals(
    lines: &[ReconciledLine],
    settings: &Settings,
    order_type: OrderType,
) -> Result<OrderTotals, CheckoutError> {
    let subtotal: Decimal = lines.iter().map(|l| l.line_total).sum();

    if order_type == OrderType::Delivery {
        if !settings.enable_delivery {
            return Err(CheckoutError::DeliveryDisabled);
        }
        if subtotal < settings.minimum_order_amount {
            return Err(CheckoutError::BelowMinimumOrder {
                required: settings.minimum_order_amount,
                actual: subtotal,
            });
        }
    }

    let tax = percentage_of(subtotal, settings.tax_percentage);
    let delivery_fee = if order_type == OrderType::Delivery {
        settings.delivery_fee
    } else {
        Decimal::ZERO
    };
    let service_charge = settings.service_charge;
    let total = subtotal + tax + delivery_fee + service_charge;

    Ok(OrderTotals {
        subtotal,
        tax,
        delivery_fee,
        service_charge,
        total,
    })
}
