//! Reference table
//!
//! Loads the ingredient CSV into typed records. Numeric fields are validated
//! once here, so lookups never see unparsed or negative values.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::{NutritionError, NutritionResult};
use crate::models::IngredientRecord;

pub const COL_INGREDIENT: &str = "Ingredient";
pub const COL_PROTEIN: &str = "Protein_per_g";
pub const COL_CARBS: &str = "Carbs_per_g";
pub const COL_FATS: &str = "Fats_per_g";
pub const COL_CALORIES: &str = "Calories";
pub const COL_INTAKE: &str = "Intake_g";

/// What to do with a row whose numeric fields do not validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Warn, record the row in `skipped_rows`, and keep loading
    #[default]
    SkipInvalid,
    /// Abort the whole load on the first invalid row
    FailFast,
}

/// A row that was left out of the table
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the source, header is line 1
    pub row: usize,
    pub reason: String,
}

/// Column positions of the required fields
struct Columns {
    ingredient: usize,
    protein: usize,
    carbs: usize,
    fats: usize,
    calories: usize,
    intake: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> NutritionResult<Self> {
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(NutritionError::MissingColumn(name))
        };

        Ok(Self {
            ingredient: position(COL_INGREDIENT)?,
            protein: position(COL_PROTEIN)?,
            carbs: position(COL_CARBS)?,
            fats: position(COL_FATS)?,
            calories: position(COL_CALORIES)?,
            intake: position(COL_INTAKE)?,
        })
    }
}

/// Read-only ingredient lookup, in source order
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    source: String,
    records: Vec<IngredientRecord>,
    index: HashMap<String, usize>,
    skipped: Vec<SkippedRow>,
    duplicates: usize,
}

impl ReferenceTable {
    /// Load the table from a CSV file
    pub fn load<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> NutritionResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let file = File::open(path).map_err(|e| NutritionError::DataSource {
            path: source.clone(),
            reason: e.to_string(),
        })?;

        Self::from_reader(file, policy, &source)
    }

    /// Load the table from any CSV reader; `source` names it in errors
    pub fn from_reader<R: Read>(reader: R, policy: LoadPolicy, source: &str) -> NutritionResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let data_source_error = |e: csv::Error| NutritionError::DataSource {
            path: source.to_string(),
            reason: e.to_string(),
        };

        let headers = csv_reader.headers().map_err(data_source_error)?.clone();
        let columns = Columns::from_headers(&headers)?;

        let mut table = Self {
            source: source.to_string(),
            ..Self::default()
        };

        // Invalid UTF-8 is a row error, not a source error
        for (i, result) in csv_reader.byte_records().enumerate() {
            let row = i + 2;
            let record = result.map_err(data_source_error)?;

            match parse_row(&record, &columns, row) {
                Ok(ingredient) => table.insert(ingredient, row),
                Err(e) => match policy {
                    LoadPolicy::FailFast => return Err(e),
                    LoadPolicy::SkipInvalid => {
                        tracing::warn!("Skipping reference row {} in {}: {}", row, source, e);
                        table.skipped.push(SkippedRow {
                            row,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        tracing::info!(
            "Loaded {} ingredients from {} ({} skipped, {} duplicates)",
            table.records.len(),
            source,
            table.skipped.len(),
            table.duplicates
        );

        Ok(table)
    }

    /// Build a table from already-typed records; the first of any duplicate
    /// name wins
    pub fn from_records<I: IntoIterator<Item = IngredientRecord>>(records: I) -> Self {
        let mut table = Self {
            source: "<memory>".to_string(),
            ..Self::default()
        };
        for (i, record) in records.into_iter().enumerate() {
            table.insert(record, i + 1);
        }
        table
    }

    fn insert(&mut self, record: IngredientRecord, row: usize) {
        if self.index.contains_key(&record.name) {
            tracing::debug!("Ignoring duplicate ingredient '{}' at row {}", record.name, row);
            self.duplicates += 1;
            return;
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> NutritionResult<&IngredientRecord> {
        self.index
            .get(name)
            .map(|&i| &self.records[i])
            .ok_or_else(|| NutritionError::NotFound(name.to_string()))
    }

    /// Case-insensitive substring search, in source order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&IngredientRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    pub fn records(&self) -> &[IngredientRecord] {
        &self.records
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}

fn parse_row(record: &ByteRecord, columns: &Columns, row: usize) -> NutritionResult<IngredientRecord> {
    let name = field_text(record, columns.ingredient, COL_INGREDIENT, row)?;
    if name.is_empty() {
        return Err(NutritionError::DataFormat {
            row,
            field: COL_INGREDIENT,
            value: String::new(),
        });
    }

    let field = |idx: usize, col: &'static str| parse_amount(record, idx, col, row);

    let ingredient = IngredientRecord {
        name: name.to_string(),
        protein_per_gram: field(columns.protein, COL_PROTEIN)?,
        carbs_per_gram: field(columns.carbs, COL_CARBS)?,
        fats_per_gram: field(columns.fats, COL_FATS)?,
        reference_calories: field(columns.calories, COL_CALORIES)?,
        reference_portion_grams: field(columns.intake, COL_INTAKE)?,
    };

    if ingredient.reference_portion_grams <= 0.0 {
        return Err(NutritionError::DataFormat {
            row,
            field: COL_INTAKE,
            value: ingredient.reference_portion_grams.to_string(),
        });
    }

    Ok(ingredient)
}

/// A field as UTF-8 text; a missing field reads as empty
fn field_text<'r>(record: &'r ByteRecord, idx: usize, col: &'static str, row: usize) -> NutritionResult<&'r str> {
    let bytes = record.get(idx).unwrap_or_default();
    std::str::from_utf8(bytes).map_err(|_| NutritionError::DataFormat {
        row,
        field: col,
        value: String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// A finite, non-negative number
fn parse_amount(record: &ByteRecord, idx: usize, col: &'static str, row: usize) -> NutritionResult<f64> {
    let raw = field_text(record, idx, col, row)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(NutritionError::DataFormat {
            row,
            field: col,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Ingredient,Protein_per_g,Carbs_per_g,Fats_per_g,Calories,Intake_g\n";

    fn load(body: &str, policy: LoadPolicy) -> NutritionResult<ReferenceTable> {
        let csv = format!("{}{}", HEADER, body);
        ReferenceTable::from_reader(csv.as_bytes(), policy, "test.csv")
    }

    #[test]
    fn test_loads_typed_records() {
        let table = load(
            "Chicken Breast,0.31,0,0.036,165,100\nWhite Rice,0.027,0.28,0.003,130,100\n",
            LoadPolicy::SkipInvalid,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let chicken = table.find("Chicken Breast").unwrap();
        assert_eq!(chicken.protein_per_gram, 0.31);
        assert_eq!(chicken.reference_calories, 165.0);
        assert_eq!(chicken.reference_portion_grams, 100.0);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Chicken Breast", "White Rice"]);
    }

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let table = load("Chicken Breast,0.31,0,0.036,165,100\n", LoadPolicy::SkipInvalid).unwrap();
        assert!(table.find("chicken breast").is_err());
        assert!(table.find("Chicken").is_err());

        let err = table.find("Unicorn Meat").unwrap_err();
        assert!(matches!(err, NutritionError::NotFound(ref n) if n == "Unicorn Meat"));
    }

    #[test]
    fn test_find_is_idempotent() {
        let table = load("Egg,0.13,0.011,0.11,78,50\n", LoadPolicy::SkipInvalid).unwrap();
        let first = table.find("Egg").unwrap().clone();
        let second = table.find("Egg").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let table = load("Oats,0.13,0.66,0.07,389,100\nOats,1,1,1,1,1\n", LoadPolicy::SkipInvalid).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.duplicate_count(), 1);
        assert_eq!(table.find("Oats").unwrap().reference_calories, 389.0);
    }

    #[test]
    fn test_bad_encoding_skips_only_that_row() {
        let mut csv = HEADER.as_bytes().to_vec();
        csv.extend_from_slice(b"Chicken Breast,0.31,0,0.036,165,100\n");
        csv.extend_from_slice(b"Jalape\xf1o,0.009,0.065,0.004,29,100\n");
        csv.extend_from_slice(b"White Rice,0.027,0.28,0.003,130,100\n");

        let table = ReferenceTable::from_reader(csv.as_slice(), LoadPolicy::SkipInvalid, "test.csv").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_rows().len(), 1);
        assert_eq!(table.skipped_rows()[0].row, 3);
        assert!(table.skipped_rows()[0].reason.contains(COL_INGREDIENT));
        assert!(table.find("White Rice").is_ok());

        let err = ReferenceTable::from_reader(csv.as_slice(), LoadPolicy::FailFast, "test.csv").unwrap_err();
        assert!(matches!(err, NutritionError::DataFormat { row: 3, field: COL_INGREDIENT, .. }));
    }

    #[test]
    fn test_skip_invalid_rows() {
        let table = load(
            "Good,0.1,0.2,0.3,100,100\nBad,abc,0.2,0.3,100,100\nZeroPortion,0.1,0.1,0.1,10,0\nShort,0.1\n",
            LoadPolicy::SkipInvalid,
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let skipped = table.skipped_rows();
        assert_eq!(skipped.len(), 3);
        assert_eq!(skipped[0].row, 3);
        assert!(skipped[0].reason.contains("Protein_per_g"));
        assert!(skipped[1].reason.contains("Intake_g"));
        assert!(table.find("Bad").is_err());
    }

    #[test]
    fn test_fail_fast_rejects_whole_load() {
        let err = load("Good,0.1,0.2,0.3,100,100\nBad,0.1,,0.3,100,100\n", LoadPolicy::FailFast).unwrap_err();
        match err {
            NutritionError::DataFormat { row, field, .. } => {
                assert_eq!(row, 3);
                assert_eq!(field, COL_CARBS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_and_nan_values_rejected() {
        let table = load("Neg,-0.1,0,0,10,100\nNan,NaN,0,0,10,100\n", LoadPolicy::SkipInvalid).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.skipped_rows().len(), 2);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Ingredient,Protein_per_g,Carbs_per_g,Fats_per_g,Calories\nA,1,1,1,1\n";
        let err = ReferenceTable::from_reader(csv.as_bytes(), LoadPolicy::SkipInvalid, "t.csv").unwrap_err();
        assert!(matches!(err, NutritionError::MissingColumn(COL_INTAKE)));
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let csv = "Id, Ingredient ,Intake_g,Calories,Fats_per_g,Carbs_per_g,Protein_per_g\n7, Banana , 118 , 105 ,0.003,0.23,0.011\n";
        let table = ReferenceTable::from_reader(csv.as_bytes(), LoadPolicy::FailFast, "t.csv").unwrap();
        let banana = table.find("Banana").unwrap();
        assert_eq!(banana.reference_portion_grams, 118.0);
        assert_eq!(banana.carbs_per_gram, 0.23);
    }

    #[test]
    fn test_bundled_reference_file_loads_cleanly() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/cleaned_food_data.csv");
        let table = ReferenceTable::load(&path, LoadPolicy::FailFast).unwrap();
        assert!(table.len() >= 10);
        assert_eq!(table.find("Chicken Breast").unwrap().reference_calories, 165.0);
    }

    #[test]
    fn test_missing_file_is_data_source_error() {
        let err = ReferenceTable::load("/nonexistent/dir/food.csv", LoadPolicy::SkipInvalid).unwrap_err();
        assert_eq!(err.kind(), "data_source");
        assert!(matches!(err, NutritionError::DataSource { .. }));
    }

    #[test]
    fn test_search() {
        let table = load(
            "Chicken Breast,0.31,0,0.036,165,100\nChicken Thigh,0.26,0,0.1,209,100\nRice,0.027,0.28,0.003,130,100\n",
            LoadPolicy::SkipInvalid,
        )
        .unwrap();
        assert_eq!(table.search("chicken", 10).len(), 2);
        assert_eq!(table.search("chicken", 1)[0].name, "Chicken Breast");
        assert_eq!(table.search("", 10).len(), 3);
    }

    #[test]
    fn test_from_records() {
        let record = IngredientRecord {
            name: "Tofu".into(),
            protein_per_gram: 0.08,
            carbs_per_gram: 0.019,
            fats_per_gram: 0.048,
            reference_calories: 76.0,
            reference_portion_grams: 100.0,
        };
        let table = ReferenceTable::from_records(vec![record.clone(), record]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.duplicate_count(), 1);
    }
}
