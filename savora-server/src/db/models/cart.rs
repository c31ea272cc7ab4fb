//! Cart Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::food::FoodSummary;

pub type CartId = RecordId;

/// One (food, quantity) line in a cart
///
/// A cart holds at most one line per distinct food; adding the same food
/// again merges by summing quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Record link to food
    pub food: RecordId,
    pub quantity: i64,
}

/// A user's pending selection, one cart per user
///
/// Created lazily on the first add-to-cart call; emptied (not deleted) when
/// an order is created from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    /// Record link to the owning user
    pub user: RecordId,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user: RecordId) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a line into the cart: sum quantities for an existing food,
    /// append otherwise
    pub fn add_line(&mut self, food: RecordId, quantity: i64) {
        match self.items.iter_mut().find(|line| line.food == food) {
            Some(line) => line.quantity += quantity,
            None => self.items.push(CartLine { food, quantity }),
        }
        self.updated_at = Utc::now();
    }
}

/// Cart line with the food reference resolved for display
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub food: FoodSummary,
    pub quantity: i64,
}

/// Cart as returned to the client: resolved lines plus running totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total_items: i64,
    pub total_amount: Decimal,
}

impl CartView {
    /// The view returned when the user has no cart yet
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_amount: Decimal::ZERO,
        }
    }
}
