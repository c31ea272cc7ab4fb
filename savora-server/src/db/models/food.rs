//! Food Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::{Validate, ValidationError};

pub type FoodId = RecordId;

/// Catalog item: an orderable dish with price, stock and delivery estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FoodId>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Unit price
    pub price: Decimal,
    /// Estimated delivery time in minutes
    pub time_to_delivery: i64,
    /// Remaining stock, never negative
    pub available_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a food item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(length(min = 1, max = 200, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "is required"))]
    pub image: String,
    #[validate(custom(function = "validate_non_negative_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub time_to_delivery: i64,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub available_count: i64,
}

fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price").with_message("must not be negative".into()));
    }
    Ok(())
}

impl FoodCreate {
    /// Build the storable record with the creation timestamp applied
    pub fn into_food(self) -> Food {
        Food {
            id: None,
            name: self.name,
            description: self.description,
            image: self.image,
            price: self.price,
            time_to_delivery: self.time_to_delivery,
            available_count: self.available_count,
            created_at: Utc::now(),
        }
    }
}

/// Display projection used when resolving food references in carts and orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: Decimal,
}

impl From<&Food> for FoodSummary {
    fn from(food: &Food) -> Self {
        Self {
            id: food.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name: food.name.clone(),
            description: food.description.clone(),
            image: food.image.clone(),
            price: food.price,
        }
    }
}
