//! Supplement log entry model
//!
//! Free-form supplement intake: a name and optional dosage/notes text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{NutritionError, NutritionResult};
use crate::log::Dated;

/// A logged supplement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementLogEntry {
    pub date: NaiveDate,
    pub name: String,
    pub notes: Option<String>,
}

/// Data for creating a supplement entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementCreate {
    pub name: String,
    pub notes: Option<String>,
}

impl SupplementLogEntry {
    /// Validate and build an entry. Names and notes are trimmed; blank notes
    /// are stored as `None`.
    pub fn new(date: NaiveDate, data: SupplementCreate) -> NutritionResult<Self> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(NutritionError::InvalidInput(
                "Supplement name cannot be empty".to_string(),
            ));
        }

        let notes = data
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            date,
            name: name.to_string(),
            notes,
        })
    }
}

impl Dated for SupplementLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
