//! Food API Handlers
//!
//! 目录读取是公开的; 购物车和订单接口绑定当前用户, 写目录需要管理员。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert;
use crate::auth::CurrentUser;
use crate::checkout::CheckoutService;
use crate::core::ServerState;
use crate::db::models::{CartView, Food, FoodCreate, OrderStatus, OrderView};
use crate::db::repository::FoodRepository;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResponse, AppResult, PageQuery, Pagination, ok, ok_with_message};

const FOOD_TABLE: &str = "food";

/// GET /api/foods - 获取目录 (公开)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Food>>>> {
    let repo = FoodRepository::new(state.db.clone());
    let foods = repo.find_all().await.map_err(convert::from_repo)?;
    Ok(ok(foods))
}

/// GET /api/foods/:id - 获取单个菜品 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Food>>> {
    let id = convert::parse_record_id(FOOD_TABLE, &id)?;
    let repo = FoodRepository::new(state.db.clone());
    let food = repo
        .find_by_id(&id)
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(|| AppError::not_found(format!("Food {}", id)))?;
    Ok(ok(food))
}

/// POST /api/foods - 新建菜品 (管理员)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<FoodCreate>,
) -> AppResult<Json<AppResponse<Food>>> {
    require_admin(&user)?;
    validate_payload(&payload)?;

    let repo = FoodRepository::new(state.db.clone());
    let food = repo
        .create(payload.into_food())
        .await
        .map_err(convert::from_repo)?;
    Ok(ok_with_message(food, "Food created"))
}

/// POST /api/foods/batch - 批量导入菜品 (管理员)
pub async fn create_batch(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<Vec<FoodCreate>>,
) -> AppResult<Json<AppResponse<Vec<Food>>>> {
    require_admin(&user)?;
    if payload.is_empty() {
        return Err(AppError::validation("batch must not be empty"));
    }
    for item in &payload {
        validate_payload(item)?;
    }

    let repo = FoodRepository::new(state.db.clone());
    let foods = repo
        .insert_many(payload.into_iter().map(FoodCreate::into_food).collect())
        .await
        .map_err(convert::from_repo)?;
    Ok(ok_with_message(foods, "Foods created"))
}

// =============================================================================
// Cart
// =============================================================================

/// 加入购物车请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub food_id: String,
    pub quantity: i64,
}

/// GET /api/foods/cart - 当前用户购物车
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<CartView>>> {
    let checkout = CheckoutService::new(state.db.clone());
    let view = checkout.cart_view(&user.id).await?;
    Ok(ok(view))
}

/// POST /api/foods/cart - 加入购物车 (同一菜品自动合并数量)
pub async fn add_to_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<AppResponse<CartView>>> {
    let food_id = convert::parse_record_id(FOOD_TABLE, &payload.food_id)?;

    let checkout = CheckoutService::new(state.db.clone());
    checkout
        .add_to_cart(&user.id, &food_id, payload.quantity)
        .await?;

    let view = checkout.cart_view(&user.id).await?;
    Ok(ok_with_message(view, "Added to cart"))
}

// =============================================================================
// Orders
// =============================================================================

/// 订单历史查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub status: Option<OrderStatus>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// 订单历史响应: 一页订单 + 分页元数据
#[derive(Debug, Serialize)]
pub struct OrderHistory {
    pub orders: Vec<OrderView>,
    pub pagination: Pagination,
}

/// POST /api/foods/orders - 从购物车下单
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let checkout = CheckoutService::new(state.db.clone());
    let order = checkout.create_order(&user.id).await?;

    tracing::info!(
        user = %user.id,
        order = ?order.id,
        total = %order.total_amount,
        "Order created"
    );

    let view = checkout.resolve_order(order).await?;
    Ok(ok_with_message(view, "Order created"))
}

/// GET /api/foods/orders - 订单历史 (新到旧, 分页, 可按状态过滤)
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderHistoryQuery>,
) -> AppResult<Json<AppResponse<OrderHistory>>> {
    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    };

    let checkout = CheckoutService::new(state.db.clone());
    let (orders, pagination) = checkout.order_history(&user.id, query.status, &page).await?;

    Ok(ok(OrderHistory { orders, pagination }))
}

fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_admin {
        return Err(AppError::forbidden("Admin permission required"));
    }
    Ok(())
}
