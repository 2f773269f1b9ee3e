//! Unit conversion functions
//!
//! Turns user-entered quantities into grams (food) or kilograms (body weight).

use super::units::{categorize_unit, grams_per_unit, ParsedUnit, UnitCategory, G_PER_KG};
use crate::error::{NutritionError, NutritionResult};

/// Parse a unit string, extracting any gram annotation
///
/// Examples:
/// - "g" -> ParsedUnit { base_unit: "g", gram_weight: None, .. }
/// - "slice (28g)" -> ParsedUnit { base_unit: "slice", gram_weight: Some(28.0), .. }
pub fn parse_unit(unit_str: &str) -> ParsedUnit {
    let trimmed = unit_str.trim();

    if let (Some(open), Some(close)) = (trimmed.find('('), trimmed.rfind(')')) {
        if open < close {
            let base_unit = trimmed[..open].trim().to_lowercase();
            let gram_weight = parse_gram_annotation(&trimmed[open + 1..close]);
            let category = categorize_unit(&base_unit);
            return ParsedUnit {
                base_unit,
                gram_weight,
                category,
            };
        }
    }

    let base_unit = trimmed.to_lowercase();
    let category = categorize_unit(&base_unit);
    ParsedUnit {
        base_unit,
        gram_weight: None,
        category,
    }
}

/// Parse a gram annotation like "28g", "28 g" or "28 grams"
fn parse_gram_annotation(s: &str) -> Option<f64> {
    let lower = s.to_lowercase();
    let trimmed = lower.trim();

    // longest suffix first so "grams" is not read as "gram" + "s"
    for suffix in &["grams", "gram", "g"] {
        if let Some(num_part) = trimmed.strip_suffix(suffix) {
            if let Ok(val) = num_part.trim().parse::<f64>() {
                return Some(val);
            }
        }
    }

    None
}

/// Convert a food quantity in the given unit to grams
pub fn to_grams(quantity: f64, unit: &str) -> NutritionResult<f64> {
    let parsed = parse_unit(unit);

    if let Some(grams_per) = parsed.gram_weight {
        return Ok(quantity * grams_per);
    }

    if let Some(factor) = grams_per_unit(&parsed.base_unit) {
        return Ok(quantity * factor);
    }

    let reason = match parsed.category {
        UnitCategory::Volume => format!(
            "volume unit '{}' needs a gram annotation, e.g. '{} (15g)'",
            parsed.base_unit, parsed.base_unit
        ),
        _ => format!("unknown unit '{}'", unit.trim()),
    };
    Err(NutritionError::InvalidInput(reason))
}

/// Convert a body weight in the given unit (kg, lb, ...) to kilograms
pub fn to_kg(weight: f64, unit: &str) -> NutritionResult<f64> {
    match grams_per_unit(unit) {
        Some(factor) => Ok(weight * factor / G_PER_KG),
        None => Err(NutritionError::InvalidInput(format!(
            "unknown weight unit '{}'",
            unit.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_simple() {
        let parsed = parse_unit("g");
        assert_eq!(parsed.base_unit, "g");
        assert_eq!(parsed.gram_weight, None);
        assert_eq!(parsed.category, UnitCategory::Weight);
    }

    #[test]
    fn test_parse_unit_with_gram_annotation() {
        let parsed = parse_unit("Slice (28g)");
        assert_eq!(parsed.base_unit, "slice");
        assert_eq!(parsed.gram_weight, Some(28.0));
        assert_eq!(parsed.category, UnitCategory::Custom);

        assert_eq!(parse_unit("scoop (31 grams)").gram_weight, Some(31.0));
    }

    #[test]
    fn test_to_grams() {
        assert_eq!(to_grams(150.0, "g").unwrap(), 150.0);
        assert!((to_grams(5.0, "oz").unwrap() - 141.7475).abs() < 1e-9);
        assert_eq!(to_grams(0.2, "kg").unwrap(), 200.0);
        assert_eq!(to_grams(2.0, "slice (28g)").unwrap(), 56.0);
        assert_eq!(to_grams(2.0, "tbsp (15g)").unwrap(), 30.0);
    }

    #[test]
    fn test_to_grams_rejects_unconvertible_units() {
        let err = to_grams(1.0, "cup").unwrap_err();
        assert!(err.to_string().contains("gram annotation"));
        assert_eq!(to_grams(1.0, "handful").unwrap_err().kind(), "invalid_input");
    }

    #[test]
    fn test_to_kg() {
        assert_eq!(to_kg(80.0, "kg").unwrap(), 80.0);
        assert!((to_kg(176.37, "lb").unwrap() - 80.000021).abs() < 1e-6);
        assert!(to_kg(80.0, "stone").is_err());
    }
}
