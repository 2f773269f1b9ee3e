//! Reference data module
//!
//! The ingredient table, loaded once per process and shared read-only.

pub mod table;

use std::path::Path;
use std::sync::OnceLock;

pub use table::{LoadPolicy, ReferenceTable, SkippedRow};

use crate::error::NutritionResult;

/// Process-wide reference table
static REFERENCE_TABLE: OnceLock<ReferenceTable> = OnceLock::new();

/// Load the reference table on first call and return the shared instance
///
/// Later calls return the table loaded first, whatever path they pass.
pub fn init_global<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> NutritionResult<&'static ReferenceTable> {
    if let Some(table) = REFERENCE_TABLE.get() {
        return Ok(table);
    }

    let table = ReferenceTable::load(path, policy)?;
    Ok(REFERENCE_TABLE.get_or_init(|| table))
}
