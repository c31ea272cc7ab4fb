//! Recipe API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/recipes | GET | 菜谱列表 (可按分类过滤) | 无 |
//! | /api/recipes | POST | 发布菜谱 | JWT |
//! | /api/recipes/new | GET | 最新菜谱 | 无 |
//! | /api/recipes/{id} | GET | 单个菜谱 | 无 |
//! | /api/recipes/{id} | PUT | 更新菜谱 | 作者或管理员 |
//! | /api/recipes/{id} | DELETE | 删除菜谱 | 作者或管理员 |
//! | /api/recipes/{id}/comments | GET | 菜谱评论 | 无 |
//! | /api/recipes/{id}/comments | POST | 发表评论 | JWT |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipes", recipe_routes())
}

fn recipe_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/new", get(handler::newest))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/comments",
            get(handler::list_comments).post(handler::add_comment),
        )
}
