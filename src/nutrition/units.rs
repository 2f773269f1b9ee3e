//! Unit types and conversion constants
//!
//! Weight units only: the reference table is per gram and body weight is in
//! kilograms. Volume units are recognised so they can be rejected with a
//! useful message.

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup); not convertible without a gram annotation
    Volume,
    /// Anything else (slice, scoop, piece)
    Custom,
}

/// A parsed unit with optional gram weight annotation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUnit {
    /// The base unit string (e.g., "slice" from "slice (28g)")
    pub base_unit: String,
    /// Gram weight per unit if annotated (e.g., 28.0 from "(28g)")
    pub gram_weight: Option<f64>,
    pub category: UnitCategory,
}

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Get the conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();

    match lower.trim() {
        "g" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

fn is_volume_unit(unit: &str) -> bool {
    matches!(
        unit,
        "ml" | "milliliter" | "milliliters" | "l" | "liter" | "liters"
            | "tsp" | "teaspoon" | "teaspoons" | "tbsp" | "tablespoon" | "tablespoons"
            | "fl oz" | "cup" | "cups"
    )
}

/// Determine the category of a unit string
pub fn categorize_unit(unit: &str) -> UnitCategory {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    if grams_per_unit(trimmed).is_some() {
        UnitCategory::Weight
    } else if is_volume_unit(trimmed) {
        UnitCategory::Volume
    } else {
        UnitCategory::Custom
    }
}
