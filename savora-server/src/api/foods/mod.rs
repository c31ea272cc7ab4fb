//! Food API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/foods | GET | 目录列表 | 无 |
//! | /api/foods | POST | 新建菜品 | 管理员 |
//! | /api/foods/batch | POST | 批量导入菜品 | 管理员 |
//! | /api/foods/cart | GET | 获取购物车 | JWT |
//! | /api/foods/cart | POST | 加入购物车 | JWT |
//! | /api/foods/orders | GET | 订单历史 | JWT |
//! | /api/foods/orders | POST | 购物车下单 | JWT |
//! | /api/foods/{id} | GET | 单个菜品 | 无 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/foods", food_routes())
}

fn food_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/batch", post(handler::create_batch))
        .route("/cart", get(handler::get_cart).post(handler::add_to_cart))
        .route(
            "/orders",
            get(handler::list_orders).post(handler::create_order),
        )
        .route("/{id}", get(handler::get_by_id))
}
