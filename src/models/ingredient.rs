//! Ingredient record model
//!
//! One row of the reference table: per-gram macros plus a reference portion
//! for calorie scaling.

use serde::{Deserialize, Serialize};

/// Per-gram nutrition data for a single ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub protein_per_gram: f64,
    pub carbs_per_gram: f64,
    pub fats_per_gram: f64,
    /// Calories for `reference_portion_grams`
    pub reference_calories: f64,
    pub reference_portion_grams: f64,
}

impl IngredientRecord {
    /// Calories contained in one gram
    pub fn calories_per_gram(&self) -> f64 {
        self.reference_calories / self.reference_portion_grams
    }

    /// First field that is not a finite number, if any
    pub fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("protein_per_gram", self.protein_per_gram),
            ("carbs_per_gram", self.carbs_per_gram),
            ("fats_per_gram", self.fats_per_gram),
            ("reference_calories", self.reference_calories),
            ("reference_portion_grams", self.reference_portion_grams),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(field, _)| field)
    }
}
