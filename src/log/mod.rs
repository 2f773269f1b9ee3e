//! Session logs
//!
//! Append-only food, supplement and weight logs plus per-day aggregation.

pub mod aggregate;
pub mod store;

pub use aggregate::{
    daily_summary, filter_by_date, sum_numeric_fields, weight_series, DailySummary, DailyTotals,
    Dated, WeightPoint,
};
pub use store::{LogCounts, LogKind, LogStore, LogView, Session};
