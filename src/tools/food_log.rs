//! Food log tools
//!
//! Ingredient lookup and food logging against the reference table.

use serde::Serialize;

use super::days::{resolve_date, TotalsDisplay};
use crate::error::NutritionResult;
use crate::log::{filter_by_date, sum_numeric_fields, DailyTotals, Session};
use crate::models::{FoodLogEntry, IngredientRecord};
use crate::nutrition::{compute, to_grams};
use crate::reference::ReferenceTable;

/// Response for log_food
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub entry: FoodLogEntry,
    pub day_totals: DailyTotals,
    pub display: TotalsDisplay,
}

/// Summary of an ingredient for list results
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub name: String,
    pub calories_per_100g: f64,
}

impl From<&IngredientRecord> for IngredientSummary {
    fn from(record: &IngredientRecord) -> Self {
        Self {
            name: record.name.clone(),
            calories_per_100g: record.calories_per_gram() * 100.0,
        }
    }
}

/// Response for list_ingredients
#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub items: Vec<IngredientSummary>,
    pub returned: usize,
    pub table_size: usize,
}

/// Full ingredient detail
#[derive(Debug, Serialize)]
pub struct IngredientDetail {
    #[serde(flatten)]
    pub record: IngredientRecord,
    pub calories_per_gram: f64,
}

/// Look up an ingredient, compute the consumed macros and append the entry
///
/// Nothing is appended unless every step succeeds.
pub fn log_food(
    reference: &ReferenceTable,
    session: &mut Session,
    ingredient: &str,
    quantity: f64,
    unit: Option<&str>,
    date: Option<&str>,
) -> NutritionResult<LogFoodResponse> {
    let date = resolve_date(date)?;
    let record = reference.find(ingredient)?;
    let quantity_grams = to_grams(quantity, unit.unwrap_or("g"))?;
    let entry = compute(record, quantity_grams, date)?;

    session.append_food(entry.clone());
    tracing::info!(
        "Logged {:.1} g of {} on {} ({:.1} kcal)",
        entry.quantity_grams,
        entry.ingredient_name,
        date,
        entry.calories
    );

    let day_totals = sum_numeric_fields(filter_by_date(session.food().entries(), date));

    Ok(LogFoodResponse {
        entry,
        display: TotalsDisplay::from(&day_totals),
        day_totals,
    })
}

/// List ingredients, optionally filtered by a name fragment
pub fn list_ingredients(reference: &ReferenceTable, query: Option<&str>, limit: usize) -> ListIngredientsResponse {
    let limit = limit.clamp(1, 500);
    let items: Vec<IngredientSummary> = reference
        .search(query.unwrap_or(""), limit)
        .into_iter()
        .map(IngredientSummary::from)
        .collect();

    ListIngredientsResponse {
        returned: items.len(),
        items,
        table_size: reference.len(),
    }
}

/// Get one ingredient by exact name
pub fn get_ingredient(reference: &ReferenceTable, name: &str) -> NutritionResult<IngredientDetail> {
    let record = reference.find(name)?;
    Ok(IngredientDetail {
        calories_per_gram: record.calories_per_gram(),
        record: record.clone(),
    })
}
