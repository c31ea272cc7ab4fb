//! Recipe API Handlers
//!
//! 读取公开; 发布需要登录; 更新和删除仅限作者或管理员。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::api::convert;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Comment, Recipe, RecipeCreate, RecipeUpdate};
use crate::db::repository::RecipeRepository;
use crate::utils::validation::{MAX_TEXT_LEN, validate_payload, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

const RECIPE_TABLE: &str = "recipe";

/// 最新菜谱接口返回的条数
const NEWEST_LIMIT: i64 = 4;

/// 菜谱列表查询参数
#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub category: Option<String>,
}

/// GET /api/recipes - 菜谱列表, 可按分类过滤 (公开)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RecipeListQuery>,
) -> AppResult<Json<AppResponse<Vec<Recipe>>>> {
    let repo = RecipeRepository::new(state.db.clone());
    let recipes = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => repo.find_by_category(category).await,
        None => repo.find_all().await,
    }
    .map_err(convert::from_repo)?;
    Ok(ok(recipes))
}

/// GET /api/recipes/new - 最新菜谱 (公开)
pub async fn newest(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Recipe>>>> {
    let repo = RecipeRepository::new(state.db.clone());
    let recipes = repo
        .find_newest(NEWEST_LIMIT)
        .await
        .map_err(convert::from_repo)?;
    Ok(ok(recipes))
}

/// GET /api/recipes/:id - 单个菜谱 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Recipe>>> {
    let id = convert::parse_record_id(RECIPE_TABLE, &id)?;
    let repo = RecipeRepository::new(state.db.clone());
    let recipe = repo
        .find_by_id(&id)
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(|| AppError::not_found(format!("Recipe {}", id)))?;
    Ok(ok(recipe))
}

/// POST /api/recipes - 发布菜谱
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RecipeCreate>,
) -> AppResult<Json<AppResponse<Recipe>>> {
    validate_payload(&payload)?;

    let repo = RecipeRepository::new(state.db.clone());
    let recipe = repo
        .create(payload.into_recipe(user.id))
        .await
        .map_err(convert::from_repo)?;
    Ok(ok_with_message(recipe, "Recipe created"))
}

/// PUT /api/recipes/:id - 更新菜谱 (作者或管理员)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RecipeUpdate>,
) -> AppResult<Json<AppResponse<Recipe>>> {
    let id = convert::parse_record_id(RECIPE_TABLE, &id)?;
    let repo = RecipeRepository::new(state.db.clone());
    require_author(&repo, &id, &user).await?;

    let updated = repo.update(&id, payload).await.map_err(convert::from_repo)?;
    Ok(ok(updated))
}

/// DELETE /api/recipes/:id - 删除菜谱 (作者或管理员)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let id = convert::parse_record_id(RECIPE_TABLE, &id)?;
    let repo = RecipeRepository::new(state.db.clone());
    require_author(&repo, &id, &user).await?;

    repo.delete(&id).await.map_err(convert::from_repo)?;
    Ok(ok_with_message((), "Recipe deleted"))
}

// =============================================================================
// Comments
// =============================================================================

/// 评论请求
#[derive(Debug, Deserialize)]
pub struct CommentCreate {
    pub comment: String,
}

/// GET /api/recipes/:id/comments - 菜谱评论, 按发表顺序 (公开)
pub async fn list_comments(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Comment>>>> {
    let id = convert::parse_record_id(RECIPE_TABLE, &id)?;
    let repo = RecipeRepository::new(state.db.clone());
    let recipe = repo
        .find_by_id(&id)
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(|| AppError::not_found(format!("Recipe {}", id)))?;

    let comments = repo
        .find_comments(&recipe.comments)
        .await
        .map_err(convert::from_repo)?;
    Ok(ok(comments))
}

/// POST /api/recipes/:id/comments - 发表评论
pub async fn add_comment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<AppResponse<Comment>>> {
    let id = convert::parse_record_id(RECIPE_TABLE, &id)?;
    validate_required_text(&payload.comment, "comment", MAX_TEXT_LEN)?;

    let repo = RecipeRepository::new(state.db.clone());
    let comment = repo
        .add_comment(&id, Comment::new(payload.comment, user.id))
        .await
        .map_err(convert::from_repo)?;
    Ok(ok_with_message(comment, "Comment added"))
}

/// 仅作者本人或管理员可修改菜谱
async fn require_author(
    repo: &RecipeRepository,
    id: &RecordId,
    user: &CurrentUser,
) -> Result<(), AppError> {
    let recipe = repo
        .find_by_id(id)
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(|| AppError::not_found(format!("Recipe {}", id)))?;

    if recipe.user != user.id && !user.is_admin {
        return Err(AppError::forbidden("Only the author may modify this recipe"));
    }
    Ok(())
}
