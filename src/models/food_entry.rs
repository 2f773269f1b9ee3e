//! Food log entry model
//!
//! A computed record of one food consumed on one date. Built only by the
//! calculator and never changed afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::log::Dated;

/// A single logged food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub date: NaiveDate,
    pub ingredient_name: String,
    pub quantity_grams: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub calories: f64,
}

impl Dated for FoodLogEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
