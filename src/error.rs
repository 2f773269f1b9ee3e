//! Error types
//!
//! One error enum for every failure a user action or the reference load can hit.

use serde::Serialize;
use thiserror::Error;

/// Nutrilog error types
#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("Reference data unavailable at '{path}': {reason}")]
    DataSource { path: String, reason: String },

    #[error("Reference data is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}: field '{field}' has invalid value '{value}'")]
    DataFormat {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Ingredient not found: {0}")]
    NotFound(String),

    #[error("Quantity must be a positive number of grams, got {0}")]
    InvalidQuantity(f64),

    #[error("Reference data for '{ingredient}' is unusable: {reason}")]
    InvalidReference { ingredient: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Chart generation failed: {0}")]
    Chart(String),
}

/// Result type for nutrilog operations
pub type NutritionResult<T> = Result<T, NutritionError>;

impl NutritionError {
    /// Stable machine-readable category, used in structured failure payloads
    pub fn kind(&self) -> &'static str {
        match self {
            NutritionError::DataSource { .. } => "data_source",
            NutritionError::MissingColumn(_) | NutritionError::DataFormat { .. } => "data_format",
            NutritionError::NotFound(_) => "not_found",
            NutritionError::InvalidQuantity(_) => "invalid_quantity",
            NutritionError::InvalidReference { .. } => "invalid_reference",
            NutritionError::InvalidInput(_) => "invalid_input",
            NutritionError::Chart(_) => "chart",
        }
    }

    /// Structured failure returned to the presentation layer
    pub fn to_failure(&self) -> Failure {
        Failure {
            error: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Failure payload shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub error: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(NutritionError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(NutritionError::InvalidQuantity(0.0).kind(), "invalid_quantity");
        assert_eq!(NutritionError::MissingColumn("Ingredient").kind(), "data_format");
    }

    #[test]
    fn test_failure_payload() {
        let failure = NutritionError::NotFound("Unicorn Meat".into()).to_failure();
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Ingredient not found: Unicorn Meat");
    }
}
