//! Nutrilog Library
//!
//! Reference-table nutrition lookup, per-session append-only logs and daily
//! aggregation.

pub mod build_info;
pub mod config;
pub mod error;
pub mod log;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod reference;
pub mod tools;

pub use error::{NutritionError, NutritionResult};
