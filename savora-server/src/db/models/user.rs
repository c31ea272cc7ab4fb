//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub type UserId = RecordId;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    /// Unique, enforced by index
    pub email: String,
    /// Argon2 hash, never exposed through the API
    pub password_hash: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Admin accounts may mutate the food catalog
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserRegister {
    #[validate(length(min = 1, max = 200, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8 to 128 characters"))]
    pub password: String,
}

/// Profile update payload, all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// User as exposed through the API (no password hash)
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            image: user.image,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
