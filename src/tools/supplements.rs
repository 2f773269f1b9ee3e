//! Supplement tools

use chrono::NaiveDate;
use serde::Serialize;

use super::days::resolve_date;
use crate::error::NutritionResult;
use crate::log::{filter_by_date, Session};
use crate::models::{SupplementCreate, SupplementLogEntry};

/// Response for log_supplement
#[derive(Debug, Serialize)]
pub struct LogSupplementResponse {
    pub entry: SupplementLogEntry,
    pub supplements_today: usize,
}

/// Response for list_supplements
#[derive(Debug, Serialize)]
pub struct ListSupplementsResponse {
    pub date: NaiveDate,
    pub supplements: Vec<SupplementLogEntry>,
    pub total: usize,
}

pub fn log_supplement(
    session: &mut Session,
    name: &str,
    notes: Option<String>,
    date: Option<&str>,
) -> NutritionResult<LogSupplementResponse> {
    let date = resolve_date(date)?;
    let entry = SupplementLogEntry::new(
        date,
        SupplementCreate {
            name: name.to_string(),
            notes,
        },
    )?;

    session.append_supplement(entry.clone());
    tracing::info!("Logged supplement {} on {}", entry.name, date);

    Ok(LogSupplementResponse {
        supplements_today: filter_by_date(session.supplements().entries(), date).len(),
        entry,
    })
}

pub fn list_supplements(session: &Session, date: Option<&str>) -> NutritionResult<ListSupplementsResponse> {
    let date = resolve_date(date)?;
    let supplements: Vec<SupplementLogEntry> = filter_by_date(session.supplements().entries(), date)
        .into_iter()
        .cloned()
        .collect();

    Ok(ListSupplementsResponse {
        date,
        total: supplements.len(),
        supplements,
    })
}
