//! Nutrition calculator
//!
//! Converts an ingredient record and a consumed quantity into a food log entry.

use chrono::NaiveDate;

use crate::error::{NutritionError, NutritionResult};
use crate::models::{FoodLogEntry, IngredientRecord};

/// Compute the macros of `quantity_grams` of `record`
///
/// Macros scale per gram; calories scale linearly from the record's reference
/// portion. Pure: nothing is logged or appended here.
pub fn compute(
    record: &IngredientRecord,
    quantity_grams: f64,
    date: NaiveDate,
) -> NutritionResult<FoodLogEntry> {
    if !quantity_grams.is_finite() || quantity_grams <= 0.0 {
        return Err(NutritionError::InvalidQuantity(quantity_grams));
    }

    if let Some(field) = record.first_non_finite_field() {
        return Err(NutritionError::InvalidReference {
            ingredient: record.name.clone(),
            reason: format!("{} is not a number", field),
        });
    }

    if record.reference_portion_grams <= 0.0 {
        return Err(NutritionError::InvalidReference {
            ingredient: record.name.clone(),
            reason: format!(
                "reference portion must be positive, got {}",
                record.reference_portion_grams
            ),
        });
    }

    Ok(FoodLogEntry {
        date,
        ingredient_name: record.name.clone(),
        quantity_grams,
        protein_grams: record.protein_per_gram * quantity_grams,
        carbs_grams: record.carbs_per_gram * quantity_grams,
        fats_grams: record.fats_per_gram * quantity_grams,
        calories: record.reference_calories * (quantity_grams / record.reference_portion_grams),
    })
}
