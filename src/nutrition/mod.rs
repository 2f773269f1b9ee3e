//! Nutrition calculation module
//!
//! Per-gram macro scaling and weight unit conversions.

pub mod calculator;
pub mod converter;
pub mod units;

pub use calculator::compute;
pub use converter::{parse_unit, to_grams, to_kg};
pub use units::{categorize_unit, grams_per_unit, ParsedUnit, UnitCategory};
