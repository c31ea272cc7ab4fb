//! Order Model
//!
//! Orders are immutable once created: items and total never change, only
//! status and actual_delivery_time may be updated by fulfillment.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::food::FoodSummary;

pub type OrderId = RecordId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

/// One order line with the unit price snapshotted at order time
///
/// The snapshot decouples historical orders from later catalog price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Record link to food
    pub food: RecordId,
    pub quantity: i64,
    /// Unit price at the moment the order was created
    pub price: Decimal,
}

/// A priced, stock-committing order created from a cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// Record link to the owning user
    pub user: RecordId,
    pub items: Vec<OrderLine>,
    /// Always equals the sum over items of price × quantity
    pub total_amount: Decimal,
    pub status: OrderStatus,
    /// Promised delivery timestamp: creation time + max line delivery minutes
    pub delivery_time: DateTime<Utc>,
    /// Set later by fulfillment, absent until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Order line with the food reference resolved for display
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineView {
    /// Absent when the food was deleted after the order was placed
    pub food: Option<FoodSummary>,
    pub quantity: i64,
    pub price: Decimal,
}

/// Order as returned by the history listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub items: Vec<OrderLineView>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivery_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
