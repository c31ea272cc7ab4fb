//! Food Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Food;

const FOOD_TABLE: &str = "food";

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all foods, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(foods)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Food>> {
        let food: Option<Food> = self
            .base
            .db()
            .select((FOOD_TABLE, id.key().to_string()))
            .await?;
        Ok(food)
    }

    /// Create a single food record
    pub async fn create(&self, food: Food) -> RepoResult<Food> {
        let created: Option<Food> = self.base.db().create(FOOD_TABLE).content(food).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }

    /// Insert a batch of food records in one call
    pub async fn insert_many(&self, foods: Vec<Food>) -> RepoResult<Vec<Food>> {
        let created: Vec<Food> = self.base.db().insert(FOOD_TABLE).content(foods).await?;
        Ok(created)
    }

    /// Atomically decrement stock if (and only if) enough remains.
    ///
    /// Returns the updated record, or `None` when the condition failed —
    /// the record is untouched in that case, so `available_count` can
    /// never go negative.
    pub async fn take_stock(&self, id: &RecordId, quantity: i64) -> RepoResult<Option<Food>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $food SET available_count -= $qty \
                 WHERE available_count >= $qty RETURN AFTER",
            )
            .bind(("food", id.clone()))
            .bind(("qty", quantity))
            .await?;
        let foods: Vec<Food> = result.take(0)?;
        Ok(foods.into_iter().next())
    }

    /// Add stock back, the compensation path of a failed order
    pub async fn restore_stock(&self, id: &RecordId, quantity: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $food SET available_count += $qty")
            .bind(("food", id.clone()))
            .bind(("qty", quantity))
            .await?;
        Ok(())
    }
}
