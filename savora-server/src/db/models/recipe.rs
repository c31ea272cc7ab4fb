//! Recipe Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub type RecipeId = RecordId;

/// One ingredient entry of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub image: String,
}

/// A shared recipe with its comment references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    pub title: String,
    pub description: String,
    /// Preparation time, free text ("45 min")
    pub time: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub image: String,
    /// Category names, a recipe may belong to several
    pub category: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    /// Record links to comment, append order
    #[serde(default)]
    pub comments: Vec<RecordId>,
    /// Record link to the author
    pub user: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a recipe
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeCreate {
    #[validate(length(min = 1, max = 200, message = "is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "is required"))]
    pub ingredients: Vec<Ingredient>,
    #[validate(length(min = 1, message = "is required"))]
    pub instructions: Vec<String>,
    #[validate(length(min = 1, message = "is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "is required"))]
    pub category: Vec<String>,
}

impl RecipeCreate {
    /// Build the storable record owned by the given author
    pub fn into_recipe(self, author: RecordId) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: None,
            title: self.title,
            description: self.description,
            time: self.time,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image: self.image,
            category: self.category,
            rating: 0.0,
            comments: Vec::new(),
            user: author,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload for a recipe
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub image: Option<String>,
    pub category: Option<Vec<String>>,
    pub rating: Option<f64>,
}
