//! Order Repository
//!
//! Append-mostly: orders are created once and only `status`/`updated_at`
//! change afterwards, through a compare-and-swap conditioned on the
//! previously read status. Order numbers come from an atomic counter record
//! so concurrent terminals can never allocate the same number.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Order;
use serde::Deserialize;
use shared::OrderStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

#[derive(Debug, Deserialize)]
struct CounterRow {
    value: i64,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Allocate the next order number: `ORD-YYYYMMDD-NNNNN`
    ///
    /// The sequence lives in a single counter record and is bumped with an
    /// atomic `UPSERT ... += 1`, so unlike a client-local counter,
    /// uniqueness holds across concurrent terminals.
    pub async fn next_order_number(&self) -> RepoResult<String> {
        let mut result = self
            .base
            .db()
            .query("UPSERT counter:orders SET value += 1 RETURN AFTER")
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        let count = rows
            .into_iter()
            .next()
            .map(|r| r.value)
            .ok_or_else(|| RepoError::Database("Order counter unavailable".to_string()))?;

        Ok(format!(
            "ORD-{}-{}",
            shared::util::today_compact(),
            10000 + count
        ))
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(order)
    }

    /// Find order by its human-readable order number
    pub async fn find_by_order_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let number_owned = order_number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE order_number = $number LIMIT 1")
            .bind(("number", number_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// List orders, newest first, optionally filtered by status
    pub async fn find_all(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders WHERE status = $status \
                         ORDER BY created_at DESC LIMIT $limit START $offset",
                    )
                    .bind(("status", status))
                    .bind(("limit", limit))
                    .bind(("offset", offset))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM orders \
                         ORDER BY created_at DESC LIMIT $limit START $offset",
                    )
                    .bind(("limit", limit))
                    .bind(("offset", offset))
                    .await?
                    .take(0)?
            }
        };
        Ok(orders)
    }

    /// Compare-and-swap the order status
    ///
    /// The update is conditioned on `expected`; if a concurrent writer got
    /// there first the condition fails, zero records match, and `None` is
    /// returned: the caller reports a conflict instead of silently
    /// overwriting.
    pub async fn update_status_cas(
        &self,
        id: &str,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let rid = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = $next, updated_at = $now \
                 WHERE status = $expected RETURN AFTER",
            )
            .bind(("thing", rid))
            .bind(("next", next))
            .bind(("now", shared::util::now_millis()))
            .bind(("expected", expected))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}
