//! Recipe Repository
//!
//! Also owns the comment collection: a comment only exists as part of a
//! recipe's comment list, so the creation and append are handled here in
//! one place.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Comment, Recipe, RecipeUpdate};

const RECIPE_TABLE: &str = "recipe";
const COMMENT_TABLE: &str = "comment";

#[derive(Clone)]
pub struct RecipeRepository {
    base: BaseRepository,
}

impl RecipeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all recipes, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self
            .base
            .db()
            .query("SELECT * FROM recipe ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(recipes)
    }

    /// Find recipes carrying the given category name
    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self
            .base
            .db()
            .query("SELECT * FROM recipe WHERE category CONTAINS $category ORDER BY created_at DESC")
            .bind(("category", category.to_string()))
            .await?
            .take(0)?;
        Ok(recipes)
    }

    /// The most recently created recipes
    pub async fn find_newest(&self, limit: i64) -> RepoResult<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self
            .base
            .db()
            .query("SELECT * FROM recipe ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(recipes)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Recipe>> {
        let recipe: Option<Recipe> = self
            .base
            .db()
            .select((RECIPE_TABLE, id.key().to_string()))
            .await?;
        Ok(recipe)
    }

    pub async fn create(&self, recipe: Recipe) -> RepoResult<Recipe> {
        let created: Option<Recipe> = self.base.db().create(RECIPE_TABLE).content(recipe).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create recipe".to_string()))
    }

    /// Partial update
    pub async fn update(&self, id: &RecordId, data: RecipeUpdate) -> RepoResult<Recipe> {
        let mut set_parts: Vec<&str> = vec!["updated_at = time::now()"];
        if data.title.is_some() {
            set_parts.push("title = $title");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.time.is_some() {
            set_parts.push("time = $time");
        }
        if data.ingredients.is_some() {
            set_parts.push("ingredients = $ingredients");
        }
        if data.instructions.is_some() {
            set_parts.push("instructions = $instructions");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.rating.is_some() {
            set_parts.push("rating = $rating");
        }

        let query_str = format!("UPDATE $recipe SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(query_str).bind(("recipe", id.clone()));
        if let Some(v) = data.title {
            query = query.bind(("title", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.time {
            query = query.bind(("time", v));
        }
        if let Some(v) = data.ingredients {
            query = query.bind(("ingredients", v));
        }
        if let Some(v) = data.instructions {
            query = query.bind(("instructions", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.rating {
            query = query.bind(("rating", v));
        }

        let mut result = query.await?;
        let recipes: Vec<Recipe> = result.take(0)?;
        recipes
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Recipe {} not found", id)))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let deleted: Option<Recipe> = self
            .base
            .db()
            .delete((RECIPE_TABLE, id.key().to_string()))
            .await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Recipe {} not found", id)));
        }
        Ok(())
    }

    /// Resolve a recipe's comment references, preserving append order
    pub async fn find_comments(&self, ids: &[RecordId]) -> RepoResult<Vec<Comment>> {
        let mut comments = Vec::with_capacity(ids.len());
        for id in ids {
            let comment: Option<Comment> = self
                .base
                .db()
                .select((COMMENT_TABLE, id.key().to_string()))
                .await?;
            if let Some(comment) = comment {
                comments.push(comment);
            }
        }
        Ok(comments)
    }

    /// Create a comment record and append its id to the recipe's comment list.
    ///
    /// The recipe is checked first: a missing recipe fails without writing
    /// a comment record.
    pub async fn add_comment(&self, recipe_id: &RecordId, comment: Comment) -> RepoResult<Comment> {
        if self.find_by_id(recipe_id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Recipe {} not found", recipe_id)));
        }

        let created: Option<Comment> = self
            .base
            .db()
            .create(COMMENT_TABLE)
            .content(comment)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create comment".to_string()))?;

        let comment_id = created
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Comment created without id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $recipe SET comments += $comment RETURN AFTER")
            .bind(("recipe", recipe_id.clone()))
            .bind(("comment", comment_id.clone()))
            .await?;
        let recipes: Vec<Recipe> = result.take(0)?;
        if recipes.is_empty() {
            // Recipe deleted between the check and the append: remove the
            // comment again so the error branch leaves no orphan record
            let _: Option<Comment> = self
                .base
                .db()
                .delete((COMMENT_TABLE, comment_id.key().to_string()))
                .await?;
            return Err(RepoError::NotFound(format!("Recipe {} not found", recipe_id)));
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use surrealdb::RecordId;

    use super::*;
    use crate::db::DbService;
    use crate::db::models::{Comment, Ingredient, Recipe};

    fn recipe(author: &RecordId) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: None,
            title: "Tomato soup".to_string(),
            description: "Simple soup".to_string(),
            time: "30 min".to_string(),
            ingredients: vec![Ingredient {
                name: "Tomato".to_string(),
                amount: "4".to_string(),
                image: String::new(),
            }],
            instructions: vec!["Chop".to_string(), "Simmer".to_string()],
            image: String::new(),
            category: vec!["Soup".to_string()],
            rating: 0.0,
            comments: Vec::new(),
            user: author.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn all_comments(repo: &RecipeRepository) -> Vec<Comment> {
        repo.base.db().select(COMMENT_TABLE).await.unwrap()
    }

    #[tokio::test]
    async fn add_comment_appends_to_recipe() {
        let db = DbService::memory().await.unwrap().db;
        let repo = RecipeRepository::new(db);
        let author = RecordId::from_table_key("user", "author");

        let created = repo.create(recipe(&author)).await.unwrap();
        let recipe_id = created.id.as_ref().unwrap();

        let comment = repo
            .add_comment(recipe_id, Comment::new("Looks great".to_string(), author))
            .await
            .unwrap();

        let reloaded = repo.find_by_id(recipe_id).await.unwrap().unwrap();
        assert_eq!(reloaded.comments, vec![comment.id.unwrap()]);
    }

    #[tokio::test]
    async fn add_comment_on_missing_recipe_writes_nothing() {
        let db = DbService::memory().await.unwrap().db;
        let repo = RecipeRepository::new(db);
        let author = RecordId::from_table_key("user", "author");
        let missing = RecordId::from_table_key("recipe", "missing");

        let err = repo
            .add_comment(&missing, Comment::new("Orphan".to_string(), author))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        // The failed call must not leave a stored comment behind
        assert!(all_comments(&repo).await.is_empty());
    }
}
