//! Comment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type CommentId = RecordId;

/// A comment on a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CommentId>,
    pub comment: String,
    /// Record link to the author
    pub user: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(comment: String, author: RecordId) -> Self {
        Self {
            id: None,
            comment,
            user: author,
            created_at: Utc::now(),
        }
    }
}
