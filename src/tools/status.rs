//! Nutrilog Status Tool
//!
//! Runtime status of the service and usage instructions for assistants.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::log::LogCounts;
use crate::reference::{LoadPolicy, ReferenceTable};

/// Logging instructions for AI assistants
pub const TRACKER_INSTRUCTIONS: &str = r#"
# Nutrilog Instructions

## Dates

All tools take an optional `date` in ISO format (YYYY-MM-DD). Leaving it out logs
against today's date on the server. Entries are kept in the order they are added,
not sorted by date.

## Logging food

1. Find the exact ingredient name with `list_ingredients` (optionally with a `query`).
   Names are matched exactly and are case-sensitive.
2. Call `log_food` with `ingredient`, `quantity` and optionally `unit`.
   - `unit` defaults to `g`. Also accepted: `mg`, `kg`, `oz`, `lb`, and annotated units
     such as `slice (28g)` or `tbsp (15g)`.
   - Volume units (cup, tbsp, ml) need a gram annotation.
3. The response contains the logged entry and the day's running totals.

Macros are computed per gram. Calories are scaled from the ingredient's reference
portion: `calories = reference_calories * quantity_g / reference_portion_g`.

## Supplements

`log_supplement` with `name` and optional `notes` (dosage etc.).
`list_supplements` shows a day's supplements.

## Weight

`log_weight` with `weight` and optional `unit` (`kg` default, or `lb`).
`get_weight_history` returns the series; `render_weight_chart` writes a PNG line chart.

## Daily summary

`get_daily_summary` returns the day's foods, totals (quantity, protein, carbs, fats,
calories), supplements and weigh-ins. A day with nothing logged has all-zero totals.

## Failures

Failed calls return `{"error": <kind>, "message": <text>}` and never change the logs.
Kinds: not_found, invalid_quantity, invalid_reference, invalid_input, chart.

## Limits

Logs live only as long as this server process. There is no edit or delete.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct NutrilogStatus {
    /// Build information
    pub version: &'static str,
    pub build_profile: &'static str,
    pub build_timestamp: &'static str,

    /// Reference table information
    pub reference_path: String,
    pub reference_policy: LoadPolicy,
    pub ingredients_loaded: usize,
    pub rows_skipped: usize,
    pub duplicates_ignored: usize,

    /// Session information
    pub log_counts: LogCounts,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    policy: LoadPolicy,
}

impl StatusTracker {
    pub fn new(policy: LoadPolicy) -> Self {
        Self {
            start_time: Instant::now(),
            policy,
        }
    }

    /// Get the current status
    pub fn get_status(&self, reference: &ReferenceTable, log_counts: LogCounts) -> NutrilogStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutrilogStatus {
            version: build_info.version,
            build_profile: build_info.profile,
            build_timestamp: build_info.build_timestamp,
            reference_path: reference.source().to_string(),
            reference_policy: self.policy,
            ingredients_loaded: reference.len(),
            rows_skipped: reference.skipped_rows().len(),
            duplicates_ignored: reference.duplicate_count(),
            log_counts,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
