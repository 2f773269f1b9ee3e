//! Data models
//!
//! Reference records and the three kinds of log entry.

mod food_entry;
mod ingredient;
mod supplement_entry;
mod weight_entry;

pub use food_entry::FoodLogEntry;
pub use ingredient::IngredientRecord;
pub use supplement_entry::{SupplementCreate, SupplementLogEntry};
pub use weight_entry::WeightLogEntry;
