//! Cart Repository

use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Cart;

const CART_TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the user's cart, if one exists (one cart per user)
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Option<Cart>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Persist a cart: update in place when it has an id, create otherwise
    pub async fn save(&self, cart: Cart) -> RepoResult<Cart> {
        let saved: Option<Cart> = match cart.id.clone() {
            Some(id) => {
                self.base
                    .db()
                    .update((CART_TABLE, id.key().to_string()))
                    .content(cart)
                    .await?
            }
            None => self.base.db().create(CART_TABLE).content(cart).await?,
        };
        saved.ok_or_else(|| RepoError::Database("Failed to save cart".to_string()))
    }

    /// Empty the cart's lines without deleting the cart itself
    pub async fn clear(&self, id: &RecordId) -> RepoResult<Cart> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $cart SET items = [], updated_at = $now RETURN AFTER")
            .bind(("cart", id.clone()))
            .bind(("now", Utc::now()))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        carts
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", id)))
    }
}
