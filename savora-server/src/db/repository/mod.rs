//! Repository Module
//!
//! Per-collection CRUD over the embedded document store.

pub mod cart;
pub mod food;
pub mod order;
pub mod recipe;
pub mod user;

// Re-exports
pub use cart::CartRepository;
pub use food::FoodRepository;
pub use order::OrderRepository;
pub use recipe::RecipeRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: `table:key` throughout, handled as surrealdb::RecordId
//   - parse:   let id: RecordId = "food:abc".parse()?;
//   - create:  RecordId::from_table_key("food", "abc")
//   - key:     id.key().to_string()
// =============================================================================

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
