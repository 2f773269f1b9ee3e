//! Daily aggregation
//!
//! Filters logs by calendar date and sums the food log's numeric fields.

use chrono::NaiveDate;
use serde::Serialize;

use super::store::Session;
use crate::models::{FoodLogEntry, SupplementLogEntry, WeightLogEntry};

/// An entry tagged with a calendar date
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Summed food log fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub entry_count: usize,
    pub quantity_grams: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub calories: f64,
}

/// Entries whose date equals `date`, in their original order
pub fn filter_by_date<T: Dated>(entries: &[T], date: NaiveDate) -> Vec<&T> {
    entries.iter().filter(|e| e.date() == date).collect()
}

/// Sum quantity, macros and calories. Empty input gives all zeros.
pub fn sum_numeric_fields<'a, I>(entries: I) -> DailyTotals
where
    I: IntoIterator<Item = &'a FoodLogEntry>,
{
    entries
        .into_iter()
        .fold(DailyTotals::default(), |acc, e| DailyTotals {
            entry_count: acc.entry_count + 1,
            quantity_grams: acc.quantity_grams + e.quantity_grams,
            protein_grams: acc.protein_grams + e.protein_grams,
            carbs_grams: acc.carbs_grams + e.carbs_grams,
            fats_grams: acc.fats_grams + e.fats_grams,
            calories: acc.calories + e.calories,
        })
}

/// One point of the weight-over-time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// Weight entries as chart points, in insertion order
pub fn weight_series(entries: &[WeightLogEntry]) -> Vec<WeightPoint> {
    entries
        .iter()
        .map(|e| WeightPoint {
            date: e.date,
            weight_kg: e.weight_kg,
        })
        .collect()
}

/// Everything logged for one day
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub foods: Vec<FoodLogEntry>,
    pub totals: DailyTotals,
    pub supplements: Vec<SupplementLogEntry>,
    pub weights: Vec<WeightLogEntry>,
}

pub fn daily_summary(session: &Session, date: NaiveDate) -> DailySummary {
    let foods = filter_by_date(session.food().entries(), date);
    let totals = sum_numeric_fields(foods.iter().copied());

    DailySummary {
        date,
        foods: foods.into_iter().cloned().collect(),
        totals,
        supplements: filter_by_date(session.supplements().entries(), date)
            .into_iter()
            .cloned()
            .collect(),
        weights: filter_by_date(session.weights().entries(), date)
            .into_iter()
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn food(d: u32, name: &str, calories: f64) -> FoodLogEntry {
        FoodLogEntry {
            date: day(d),
            ingredient_name: name.to_string(),
            quantity_grams: 100.0,
            protein_grams: 10.0,
            carbs_grams: 5.0,
            fats_grams: 2.0,
            calories,
        }
    }

    fn two_day_session() -> Session {
        let mut session = Session::new();
        session.append_food(food(1, "Chicken Breast", 247.5));
        session.append_food(food(2, "Pasta", 300.0));
        session.append_food(food(1, "Apple", 100.0));
        session
    }

    #[test]
    fn test_daily_calorie_totals() {
        let session = two_day_session();
        let log = session.food().entries();

        let jan1 = sum_numeric_fields(filter_by_date(log, day(1)));
        assert_eq!(jan1.calories, 347.5);
        assert_eq!(jan1.entry_count, 2);
        assert_eq!(jan1.quantity_grams, 200.0);

        let jan2 = sum_numeric_fields(filter_by_date(log, day(2)));
        assert_eq!(jan2.calories, 300.0);
    }

    #[test]
    fn test_filter_preserves_order() {
        let session = two_day_session();
        let names: Vec<_> = filter_by_date(session.food().entries(), day(1))
            .iter()
            .map(|e| e.ingredient_name.as_str())
            .collect();
        assert_eq!(names, vec!["Chicken Breast", "Apple"]);
    }

    #[test]
    fn test_empty_and_no_match_sum_to_zero() {
        let empty: Vec<FoodLogEntry> = Vec::new();
        assert_eq!(sum_numeric_fields(filter_by_date(&empty, day(1))), DailyTotals::default());

        let session = two_day_session();
        let none = sum_numeric_fields(filter_by_date(session.food().entries(), day(9)));
        assert_eq!(none, DailyTotals::default());
        assert_eq!(none.entry_count, 0);
    }

    #[test]
    fn test_weight_series_in_insertion_order() {
        let mut session = Session::new();
        session.append_weight(WeightLogEntry { date: day(1), weight_kg: 80.0 });
        session.append_weight(WeightLogEntry { date: day(2), weight_kg: 79.5 });

        let series = weight_series(session.weights().entries());
        assert_eq!(
            series,
            vec![
                WeightPoint { date: day(1), weight_kg: 80.0 },
                WeightPoint { date: day(2), weight_kg: 79.5 },
            ]
        );
    }

    #[test]
    fn test_daily_summary() {
        let mut session = two_day_session();
        session.append_supplement(SupplementLogEntry {
            date: day(1),
            name: "Creatine".into(),
            notes: Some("5 g".into()),
        });
        session.append_supplement(SupplementLogEntry {
            date: day(2),
            name: "Fish Oil".into(),
            notes: None,
        });

        let summary = daily_summary(&session, day(1));
        assert_eq!(summary.foods.len(), 2);
        assert_eq!(summary.totals.calories, 347.5);
        assert_eq!(summary.supplements.len(), 1);
        assert_eq!(summary.supplements[0].name, "Creatine");
        assert!(summary.weights.is_empty());
    }
}
