//! Day tools
//!
//! Date handling shared by all tools, and the per-day summary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{NutritionError, NutritionResult};
use crate::log::{daily_summary, DailySummary, DailyTotals, Session};

/// Parse an ISO date ("2024-01-09"); `None` or blank means today (local time)
pub fn resolve_date(date: Option<&str>) -> NutritionResult<NaiveDate> {
    match date.map(str::trim) {
        None | Some("") => Ok(chrono::Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            NutritionError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
    }
}

/// Totals formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct TotalsDisplay {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

impl From<&DailyTotals> for TotalsDisplay {
    fn from(totals: &DailyTotals) -> Self {
        Self {
            calories: format!("{:.0} kcal", totals.calories),
            protein: format!("{:.1} g", totals.protein_grams),
            carbs: format!("{:.1} g", totals.carbs_grams),
            fats: format!("{:.1} g", totals.fats_grams),
        }
    }
}

/// Response for get_daily_summary
#[derive(Debug, Serialize)]
pub struct DailySummaryResponse {
    #[serde(flatten)]
    pub summary: DailySummary,
    pub display: TotalsDisplay,
}

/// Foods, totals, supplements and weigh-ins for one day
pub fn get_daily_summary(session: &Session, date: Option<&str>) -> NutritionResult<DailySummaryResponse> {
    let date = resolve_date(date)?;
    let summary = daily_summary(session, date);
    let display = TotalsDisplay::from(&summary.totals);

    Ok(DailySummaryResponse { summary, display })
}
