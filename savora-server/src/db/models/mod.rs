//! Database Models
//!
//! Serde structs stored in the document store, one module per collection.
//! IDs use the `table:key` [`surrealdb::RecordId`] convention throughout.

pub mod cart;
pub mod comment;
pub mod food;
pub mod order;
pub mod recipe;
pub mod user;

pub use cart::{Cart, CartLine, CartView};
pub use comment::Comment;
pub use food::{Food, FoodCreate, FoodSummary};
pub use order::{Order, OrderLine, OrderLineView, OrderStatus, OrderView};
pub use recipe::{Ingredient, Recipe, RecipeCreate, RecipeUpdate};
pub use user::{PublicUser, User, UserRegister, UserUpdate};
