//! Checkout Workflows
//!
//! The cart-to-order core: add-to-cart merging, order creation with stock
//! commitment, cart/order read models. Handlers stay thin; every rule about
//! stock, pricing and cart lifecycle lives here.
//!
//! # Stock consistency
//!
//! Stock is checked optimistically: add-to-cart performs an advisory check
//! only, the authoritative check is the conditional per-document decrement at
//! order time (`available_count` can never go negative). The multi-line order
//! is not a store transaction; instead any failure after the first decrement
//! compensates by restoring every line already taken, so a failed
//! [`CheckoutService::create_order`] leaves the catalog unchanged and writes
//! no order.


use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::models::{
    Cart, CartView, Food, FoodSummary, Order, OrderLine, OrderLineView, OrderStatus, OrderView,
    cart::CartLineView,
};
use crate::db::repository::{CartRepository, FoodRepository, OrderRepository, RepoError};
use crate::utils::{AppError, PageQuery, Pagination};

/// Checkout error taxonomy
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Food item {0} not found")]
    FoodNotFound(String),

    /// Message names the food and the remaining stock, the caller-facing
    /// diagnostic contract
    #[error("Not enough {name} in stock. Available: {available}")]
    InsufficientStock { name: String, available: i64 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<RepoError> for CheckoutError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => CheckoutError::Validation(msg),
            other => CheckoutError::Store(other.to_string()),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::FoodNotFound(msg) => AppError::not_found(msg),
            e @ CheckoutError::InsufficientStock { .. } => {
                AppError::InsufficientStock(e.to_string())
            }
            CheckoutError::EmptyCart => AppError::EmptyCart,
            CheckoutError::Validation(msg) => AppError::validation(msg),
            CheckoutError::Store(msg) => AppError::database(msg),
        }
    }
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Cart and order workflows over the document store
#[derive(Clone)]
pub struct CheckoutService {
    foods: FoodRepository,
    carts: CartRepository,
    orders: OrderRepository,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            foods: FoodRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            orders: OrderRepository::new(db),
        }
    }

    /// Add a food to the user's cart, merging with an existing line.
    ///
    /// The stock check here is advisory only: nothing is reserved, the
    /// authoritative check happens again when the order is created.
    pub async fn add_to_cart(
        &self,
        user: &RecordId,
        food_id: &RecordId,
        quantity: i64,
    ) -> CheckoutResult<Cart> {
        if quantity < 1 {
            return Err(CheckoutError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        let food = self
            .foods
            .find_by_id(food_id)
            .await?
            .ok_or_else(|| CheckoutError::FoodNotFound(food_id.to_string()))?;

        if food.available_count < quantity {
            return Err(CheckoutError::InsufficientStock {
                name: food.name,
                available: food.available_count,
            });
        }

        let mut cart = self
            .carts
            .find_by_user(user)
            .await?
            .unwrap_or_else(|| Cart::new(user.clone()));
        cart.add_line(food_id.clone(), quantity);

        Ok(self.carts.save(cart).await?)
    }

    /// Convert the user's cart into a priced, stock-committing order.
    ///
    /// Walks the cart lines in order: validates the food, atomically
    /// decrements its stock, snapshots the unit price. The delivery estimate
    /// is the creation time plus the slowest line's delivery minutes. On
    /// success the order is persisted with status `pending` and the cart is
    /// emptied.
    pub async fn create_order(&self, user: &RecordId) -> CheckoutResult<Order> {
        let cart = self
            .carts
            .find_by_user(user)
            .await?
            .filter(|c| !c.items.is_empty())
            .ok_or(CheckoutError::EmptyCart)?;

        let mut items: Vec<OrderLine> = Vec::with_capacity(cart.items.len());
        let mut total_amount = Decimal::ZERO;
        let mut max_delivery_minutes: i64 = 0;
        // Lines already decremented, restored if a later line fails
        let mut taken: Vec<(RecordId, i64)> = Vec::new();

        for line in &cart.items {
            let food = match self.foods.find_by_id(&line.food).await {
                Ok(Some(food)) => food,
                Ok(None) => {
                    self.rollback_stock(&taken).await;
                    return Err(CheckoutError::FoodNotFound(line.food.to_string()));
                }
                Err(e) => {
                    self.rollback_stock(&taken).await;
                    return Err(e.into());
                }
            };

            // Authoritative check: conditional decrement, fails atomically
            // when not enough stock remains
            match self.foods.take_stock(&line.food, line.quantity).await {
                Ok(Some(_)) => taken.push((line.food.clone(), line.quantity)),
                Ok(None) => {
                    self.rollback_stock(&taken).await;
                    return Err(CheckoutError::InsufficientStock {
                        name: food.name,
                        available: food.available_count,
                    });
                }
                Err(e) => {
                    self.rollback_stock(&taken).await;
                    return Err(e.into());
                }
            }

            // Price snapshot: later catalog changes never alter this order
            items.push(OrderLine {
                food: line.food.clone(),
                quantity: line.quantity,
                price: food.price,
            });
            total_amount += food.price * Decimal::from(line.quantity);
            max_delivery_minutes = max_delivery_minutes.max(food.time_to_delivery);
        }

        let now = Utc::now();
        let order = Order {
            id: None,
            user: user.clone(),
            items,
            total_amount,
            status: OrderStatus::Pending,
            delivery_time: now + Duration::minutes(max_delivery_minutes),
            actual_delivery_time: None,
            created_at: now,
        };

        let order = match self.orders.create(order).await {
            Ok(order) => order,
            Err(e) => {
                self.rollback_stock(&taken).await;
                return Err(e.into());
            }
        };

        // Empty the cart, keep the cart record. The order stands even if
        // this fails; the client sees the error and can retry the clear.
        if let Some(cart_id) = cart.id.as_ref() {
            if let Err(e) = self.carts.clear(cart_id).await {
                tracing::error!(error = %e, order = ?order.id, "Order created but cart clear failed");
                return Err(e.into());
            }
        }

        Ok(order)
    }

    /// Restore stock for every already-decremented line of a failed order
    async fn rollback_stock(&self, taken: &[(RecordId, i64)]) {
        for (food_id, quantity) in taken {
            if let Err(e) = self.foods.restore_stock(food_id, *quantity).await {
                tracing::error!(food = %food_id, quantity, error = %e, "Stock compensation failed");
            }
        }
    }

    /// The user's cart with food references resolved and running totals.
    ///
    /// A user without a cart gets the empty view, not an error.
    pub async fn cart_view(&self, user: &RecordId) -> CheckoutResult<CartView> {
        let Some(cart) = self.carts.find_by_user(user).await? else {
            return Ok(CartView::empty());
        };

        let mut items = Vec::with_capacity(cart.items.len());
        let mut total_items: i64 = 0;
        let mut total_amount = Decimal::ZERO;

        for line in &cart.items {
            let Some(food) = self.foods.find_by_id(&line.food).await? else {
                tracing::warn!(food = %line.food, "Cart references a deleted food, skipping line");
                continue;
            };
            total_items += line.quantity;
            total_amount += food.price * Decimal::from(line.quantity);
            items.push(CartLineView {
                food: FoodSummary::from(&food),
                quantity: line.quantity,
            });
        }

        Ok(CartView {
            items,
            total_items,
            total_amount,
        })
    }

    /// One page of the user's order history, newest first, with food
    /// references resolved for display
    pub async fn order_history(
        &self,
        user: &RecordId,
        status: Option<OrderStatus>,
        page: &PageQuery,
    ) -> CheckoutResult<(Vec<OrderView>, Pagination)> {
        let (_, page_size) = page.clamped();
        let total = self.orders.count_for_user(user, status).await?;
        let orders = self
            .orders
            .find_page_for_user(user, status, page_size, page.skip())
            .await?;

        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            views.push(self.resolve_order(order).await?);
        }

        Ok((views, Pagination::new(page, total)))
    }

    /// Resolve an order's food references into the display view
    pub async fn resolve_order(&self, order: Order) -> CheckoutResult<OrderView> {
        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let food: Option<Food> = self.foods.find_by_id(&line.food).await?;
            items.push(OrderLineView {
                food: food.as_ref().map(FoodSummary::from),
                quantity: line.quantity,
                price: line.price,
            });
        }

        Ok(OrderView {
            id: order.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            items,
            total_amount: order.total_amount,
            status: order.status,
            delivery_time: order.delivery_time,
            actual_delivery_time: order.actual_delivery_time,
            created_at: order.created_at,
        })
    }
}
