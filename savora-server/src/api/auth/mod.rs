//! 认证 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/sign-up | POST | 注册 | 无 |
//! | /api/auth/sign-in | POST | 登录 | 无 |
//! | /api/auth/profile | GET | 当前用户信息 | JWT |
//! | /api/auth/profile | PUT | 更新用户信息 | JWT |
//! | /api/auth/profile | DELETE | 注销账户 | JWT |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", auth_routes())
}

fn auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/sign-up", post(handler::sign_up))
        .route("/sign-in", post(handler::sign_in))
        .route(
            "/profile",
            get(handler::profile)
                .put(handler::update_profile)
                .delete(handler::delete_account),
        )
}
