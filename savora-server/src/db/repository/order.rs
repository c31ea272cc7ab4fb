//! Order Repository
//!
//! Orders are written once by the checkout workflow and read back by the
//! history listing; there is no update path for items or totals.

use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};

const ORDER_TABLE: &str = "food_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: i64,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self
            .base
            .db()
            .select((ORDER_TABLE, id.key().to_string()))
            .await?;
        Ok(order)
    }

    /// One page of a user's orders, newest created first
    pub async fn find_page_for_user(
        &self,
        user: &RecordId,
        status: Option<OrderStatus>,
        limit: i64,
        start: i64,
    ) -> RepoResult<Vec<Order>> {
        let mut query_str =
            String::from("SELECT * FROM food_order WHERE user = $user");
        if status.is_some() {
            query_str.push_str(" AND status = $status");
        }
        query_str.push_str(" ORDER BY created_at DESC LIMIT $limit START $start");

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("user", user.clone()))
            .bind(("limit", limit))
            .bind(("start", start));
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// Total number of a user's orders matching the optional status filter
    pub async fn count_for_user(
        &self,
        user: &RecordId,
        status: Option<OrderStatus>,
    ) -> RepoResult<i64> {
        let mut query_str =
            String::from("SELECT count() AS total FROM food_order WHERE user = $user");
        if status.is_some() {
            query_str.push_str(" AND status = $status");
        }
        query_str.push_str(" GROUP ALL");

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("user", user.clone()));
        if let Some(status) = status {
            query = query.bind(("status", status));
        }

        let rows: Vec<CountRow> = query.await?.take(0)?;
        Ok(rows.into_iter().next().map(|r| r.total).unwrap_or(0))
    }
}
