//! User Repository

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserUpdate};

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .select((USER_TABLE, id.key().to_string()))
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user; the unique email index rejects duplicates
    pub async fn create(&self, user: User) -> RepoResult<User> {
        let email = user.email.clone();
        let created: Option<User> = self
            .base
            .db()
            .create(USER_TABLE)
            .content(user)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("user_email") {
                    RepoError::Duplicate(format!("User with email {} already exists", email))
                } else {
                    RepoError::Database(msg)
                }
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Partial profile update
    pub async fn update(&self, id: &RecordId, data: UserUpdate) -> RepoResult<User> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.email.is_some() {
            set_parts.push("email = $email");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)));
        }

        let query_str = format!("UPDATE $user SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(query_str).bind(("user", id.clone()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.email {
            query = query.bind(("email", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }

        let mut result = query.await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Option<User> = self
            .base
            .db()
            .delete((USER_TABLE, id.key().to_string()))
            .await?;
        Ok(deleted.is_some())
    }
}
