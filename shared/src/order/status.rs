//! Order status state machine
//!
//! One deterministic transition table drives both customer-facing tracking
//! and the staff dashboard. The caller only ever chooses "advance" or
//! "cancel"; the successor is a pure function of `(status, order_type)`.
//!
//! ```text
//! pending → confirmed → preparing → ready → out-for-delivery → delivered   (delivery)
//! pending → confirmed → preparing → ready → delivered                      (pickup / in-store)
//! any non-terminal → cancelled
//! ```

use super::OrderType;
use serde::{Deserialize, Serialize};

/// Order status
///
/// `delivered` and `cancelled` are terminal: no transition leaves them.
/// `out-for-delivery` is reachable only for delivery orders; pickup and
/// in-store orders go from `ready` straight to `delivered` (picked up /
/// served).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether this status admits no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The single legal forward successor, or `None` at a terminal state
    pub fn next(&self, order_type: OrderType) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => match order_type {
                OrderType::Delivery => Some(OrderStatus::OutForDelivery),
                // Picked up / served
                OrderType::Pickup | OrderType::InStore => Some(OrderStatus::Delivered),
            },
            OrderStatus::OutForDelivery => match order_type {
                OrderType::Delivery => Some(OrderStatus::Delivered),
                // Unreachable state for non-delivery orders; refuse to advance
                OrderType::Pickup | OrderType::InStore => None,
            },
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether moving to `to` is legal from this status for the given order type
    ///
    /// Legal moves are the single forward successor, or cancellation from any
    /// non-terminal state.
    pub fn can_transition(&self, to: OrderStatus, order_type: OrderType) -> bool {
        if to == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next(order_type) == Some(to)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-facing status language
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusText {
    pub title: &'static str,
    pub description: &'static str,
}

/// Human-facing title and description for a status
///
/// The same status surfaces different language per fulfillment channel, so
/// this is the one place every consumer renders from.
pub fn status_text(status: OrderStatus, order_type: OrderType) -> StatusText {
    use OrderStatus::*;
    use OrderType::*;

    match (status, order_type) {
        (Pending, _) => StatusText {
            title: "Order Received",
            description: "We have received your order and will confirm it shortly.",
        },
        (Confirmed, _) => StatusText {
            title: "Order Confirmed",
            description: "The restaurant has confirmed your order.",
        },
        (Preparing, _) => StatusText {
            title: "Preparing",
            description: "The kitchen is preparing your order.",
        },
        (Ready, Delivery) => StatusText {
            title: "Ready",
            description: "Your order is ready and will be out for delivery soon.",
        },
        (Ready, Pickup) => StatusText {
            title: "Ready for Pickup",
            description: "Your order is ready. Come and get it while it's hot!",
        },
        (Ready, InStore) => StatusText {
            title: "Ready",
            description: "Your order is ready to be served.",
        },
        (OutForDelivery, _) => StatusText {
            title: "Out for Delivery",
            description: "Your order is on its way.",
        },
        (Delivered, Delivery) => StatusText {
            title: "Delivered",
            description: "Your order has been delivered. Enjoy!",
        },
        (Delivered, Pickup) => StatusText {
            title: "Picked Up",
            description: "Your order has been picked up. Enjoy!",
        },
        (Delivered, InStore) => StatusText {
            title: "Served",
            description: "Your order has been served. Enjoy!",
        },
        (Cancelled, _) => StatusText {
            title: "Cancelled",
            description: "This order has been cancelled.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path_delivery() {
        let t = OrderType::Delivery;
        assert_eq!(
            OrderStatus::Pending.next(t),
            Some(OrderStatus::Confirmed)
        );
        assert_eq!(
            OrderStatus::Confirmed.next(t),
            Some(OrderStatus::Preparing)
        );
        assert_eq!(OrderStatus::Preparing.next(t), Some(OrderStatus::Ready));
        assert_eq!(
            OrderStatus::Ready.next(t),
            Some(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            OrderStatus::OutForDelivery.next(t),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::Delivered.next(t), None);
    }

    #[test]
    fn test_ready_skips_out_for_delivery_for_pickup() {
        assert_eq!(
            OrderStatus::Ready.next(OrderType::Pickup),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(
            OrderStatus::Ready.next(OrderType::InStore),
            Some(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_out_for_delivery_unreachable_for_pickup() {
        // Pickup/in-store never enter out-for-delivery; if an order somehow
        // carries that state, it cannot advance further either.
        assert!(!OrderStatus::Ready.can_transition(OrderStatus::OutForDelivery, OrderType::Pickup));
        assert!(
            !OrderStatus::Ready.can_transition(OrderStatus::OutForDelivery, OrderType::InStore)
        );
        assert_eq!(OrderStatus::OutForDelivery.next(OrderType::Pickup), None);
    }

    #[test]
    fn test_terminal_states_have_no_successor() {
        for t in [OrderType::Pickup, OrderType::Delivery, OrderType::InStore] {
            assert_eq!(OrderStatus::Delivered.next(t), None);
            assert_eq!(OrderStatus::Cancelled.next(t), None);
        }
    }

    #[test]
    fn test_no_state_reachable_from_terminal() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ];
        for t in [OrderType::Pickup, OrderType::Delivery, OrderType::InStore] {
            for target in all {
                assert!(!OrderStatus::Delivered.can_transition(target, t));
                assert!(!OrderStatus::Cancelled.can_transition(target, t));
            }
        }
    }

    #[test]
    fn test_cancel_legal_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::OutForDelivery,
        ] {
            assert!(status.can_transition(OrderStatus::Cancelled, OrderType::Delivery));
        }
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(
            !OrderStatus::Pending.can_transition(OrderStatus::Ready, OrderType::Pickup)
        );
        assert!(
            !OrderStatus::Confirmed.can_transition(OrderStatus::Delivered, OrderType::Delivery)
        );
    }

    #[test]
    fn test_status_text_varies_by_order_type() {
        let pickup = status_text(OrderStatus::Ready, OrderType::Pickup);
        let delivery = status_text(OrderStatus::Ready, OrderType::Delivery);
        assert_eq!(pickup.title, "Ready for Pickup");
        assert_ne!(pickup.description, delivery.description);

        let served = status_text(OrderStatus::Delivered, OrderType::InStore);
        assert_eq!(served.title, "Served");
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out-for-delivery\""
        );
        let s: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(s, OrderStatus::Preparing);
    }
}
