//! Body weight log entry model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{NutritionError, NutritionResult};
use crate::log::Dated;

/// A body weight measurement in kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

impl WeightLogEntry {
    pub fn new(date: NaiveDate, weight_kg: f64) -> NutritionResult<Self> {
        if !weight_kg.is_finite() || weight_kg < 0.0 {
            return Err(NutritionError::InvalidInput(format!(
                "Weight must be a non-negative number, got {}",
                weight_kg
            )));
        }
        Ok(Self { date, weight_kg })
    }
}

impl Dated for WeightLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_validation() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(WeightLogEntry::new(d, 80.0).is_ok());
        assert!(WeightLogEntry::new(d, 0.0).is_ok());
        assert!(WeightLogEntry::new(d, -1.0).is_err());
        assert!(WeightLogEntry::new(d, f64::NAN).is_err());
    }
}
