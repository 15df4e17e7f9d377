//! Product catalog loading
//!
//! The catalog is a CSV file with a header row. Required columns:
//! `Model, Brand, Type, Power (W), Coverage Angle, Price (THB), Stock`.
//! The `Max SPL (dB)` column is optional; when it is absent the
//! recommender skips SPL filtering altogether.
//!
//! A missing file, a missing required column or a non-numeric price is a
//! [`Error::CatalogLoad`]. The caller decides how to degrade (the design flow
//! keeps producing geometry). `Power (W)` and `Stock` are display-only: a
//! blank or non-numeric cell there loads as `None` instead of failing the
//! whole file.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{Error, Result};

pub const COL_MODEL: &str = "Model";
pub const COL_BRAND: &str = "Brand";
pub const COL_TYPE: &str = "Type";
pub const COL_POWER: &str = "Power (W)";
pub const COL_COVERAGE: &str = "Coverage Angle";
pub const COL_PRICE: &str = "Price (THB)";
pub const COL_STOCK: &str = "Stock";
pub const COL_MAX_SPL: &str = "Max SPL (dB)";

/// Required catalog columns, in display order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_MODEL,
    COL_BRAND,
    COL_TYPE,
    COL_POWER,
    COL_COVERAGE,
    COL_PRICE,
    COL_STOCK,
];

/// One catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename(deserialize = "Model"))]
    pub model: String,

    #[serde(rename(deserialize = "Brand"))]
    pub brand: String,

    /// Free-text category; may carry several tags ("Full-range Ceiling")
    #[serde(rename(deserialize = "Type"))]
    pub product_type: String,

    #[serde(
        rename(deserialize = "Power (W)"),
        deserialize_with = "csv::invalid_option"
    )]
    pub power_w: Option<f64>,

    /// Kept as text: catalogs mix "90°", "90x60" and plain numbers
    #[serde(rename(deserialize = "Coverage Angle"))]
    pub coverage_angle: String,

    #[serde(rename(deserialize = "Price (THB)"))]
    pub price_thb: f64,

    /// Read as a float: stock sheets exported from spreadsheets carry "4.0"
    #[serde(
        rename(deserialize = "Stock"),
        deserialize_with = "csv::invalid_option"
    )]
    pub stock: Option<f64>,

    /// Raw `Max SPL (dB)` cell; `None` when empty or when the column is absent
    #[serde(rename(deserialize = "Max SPL (dB)"), default)]
    pub max_spl_db: Option<String>,
}

impl ProductRecord {
    /// Max SPL parsed as a number, `None` when missing or non-numeric
    pub fn max_spl(&self) -> Option<f64> {
        self.max_spl_db
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Case-insensitive check whether the Type field contains `pattern`
    pub fn type_contains(&self, pattern: &str) -> bool {
        self.product_type
            .to_lowercase()
            .contains(&pattern.to_lowercase())
    }

    /// Cells in [`Catalog::columns`] order
    pub fn to_row(&self, include_spl: bool) -> Vec<Value> {
        let mut row = vec![
            Value::String(self.model.clone()),
            Value::String(self.brand.clone()),
            Value::String(self.product_type.clone()),
            number_cell(self.power_w),
            Value::String(self.coverage_angle.clone()),
            json!(self.price_thb),
            number_cell(self.stock),
        ];
        if include_spl {
            row.push(
                self.max_spl_db
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
        }
        row
    }
}

/// Display cell for an optional number; whole values render without a fraction
fn number_cell(value: Option<f64>) -> Value {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => json!(v as i64),
        Some(v) => json!(v),
        None => Value::Null,
    }
}

/// Product table loaded fully into memory, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    has_spl_column: bool,
}

impl Catalog {
    /// Build a catalog from already-parsed records
    pub fn new(records: Vec<ProductRecord>, has_spl_column: bool) -> Self {
        Self {
            records,
            has_spl_column,
        }
    }

    /// Load a catalog from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::catalog_load(path, e))?;
        let catalog = Self::parse(file, path)?;

        info!(
            "Loaded catalog {} ({} products, SPL column {})",
            path.display(),
            catalog.len(),
            if catalog.has_spl_column { "present" } else { "absent" }
        );
        Ok(catalog)
    }

    /// Parse CSV from any reader
    ///
    /// `source` only labels errors.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self> {
        Self::parse(reader, &source.into())
    }

    fn parse<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::catalog_load(source, e))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(Error::catalog_load(
                source,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        }

        let has_spl_column = headers.iter().any(|h| h == COL_MAX_SPL);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<ProductRecord>().enumerate() {
            // Row numbers are 1-based and count the header line
            let record = row.map_err(|e| {
                Error::catalog_load(source, format!("row {}: {}", index + 2, e))
            })?;
            records.push(record);
        }

        debug!("Parsed {} catalog rows from {}", records.len(), source.display());

        Ok(Self {
            records,
            has_spl_column,
        })
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a `Max SPL (dB)` column
    pub fn has_spl_column(&self) -> bool {
        self.has_spl_column
    }

    /// Column headers for tabular display
    pub fn columns(&self) -> Vec<String> {
        display_columns(self.has_spl_column)
    }
}

/// Display column headers, with the SPL column appended when present
pub fn display_columns(include_spl: bool) -> Vec<String> {
    let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    if include_spl {
        columns.push(COL_MAX_SPL.to_string());
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_CSV: &str = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock
CS-6,Acme,Ceiling,30,110,2500,40
FR-12,Acme,Full-range,400,90x60,18000,5
";

    const SPL_CSV: &str = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock,Max SPL (dB)
FR-8,Acme,Full-range Ceiling,120,90,5000,10,92
LA-2,Acme,Line Array,1000,100x10,95000,2,n/a
SUB-18,Acme,Subwoofer,1200,omni,42000,3,
";

    fn parse(csv: &str) -> Result<Catalog> {
        Catalog::from_reader(csv.as_bytes(), "test.csv")
    }

    #[test]
    fn test_parse_basic_catalog() {
        let catalog = parse(BASIC_CSV).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.has_spl_column());
        let first = &catalog.records()[0];
        assert_eq!(first.model, "CS-6");
        assert_eq!(first.product_type, "Ceiling");
        assert_eq!(first.price_thb, 2500.0);
        assert_eq!(first.stock, Some(40.0));
        assert_eq!(first.power_w, Some(30.0));
        assert_eq!(first.max_spl_db, None);
    }

    #[test]
    fn test_parse_spl_column() {
        let catalog = parse(SPL_CSV).unwrap();
        assert!(catalog.has_spl_column());
        let records = catalog.records();
        assert_eq!(records[0].max_spl(), Some(92.0));
        assert_eq!(records[1].max_spl_db.as_deref(), Some("n/a"));
        assert_eq!(records[1].max_spl(), None);
        assert_eq!(records[2].max_spl(), None);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "Model,Brand,Type,Price (THB)\nX,Y,Ceiling,100\n";
        let err = parse(csv).unwrap_err();
        match err {
            Error::CatalogLoad { reason, .. } => {
                assert!(reason.contains("Power (W)"));
                assert!(reason.contains("Stock"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_price_fails_with_row_number() {
        let csv = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock
CS-6,Acme,Ceiling,30,110,cheap,40
";
        let err = parse(csv).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{}", err);
    }

    #[test]
    fn test_missing_file_is_catalog_load_error() {
        let err = Catalog::load("/definitely/not/here/catalog.csv").unwrap_err();
        assert!(matches!(err, Error::CatalogLoad { .. }));
    }

    #[test]
    fn test_type_contains_is_case_insensitive() {
        let catalog = parse(SPL_CSV).unwrap();
        let record = &catalog.records()[0];
        assert!(record.type_contains("ceiling"));
        assert!(record.type_contains("FULL-RANGE"));
        assert!(!record.type_contains("Subwoofer"));
    }

    #[test]
    fn test_columns_and_rows_align() {
        let catalog = parse(SPL_CSV).unwrap();
        let columns = catalog.columns();
        assert_eq!(columns.len(), 8);
        assert_eq!(columns[7], COL_MAX_SPL);
        let row = catalog.records()[2].to_row(true);
        assert_eq!(row.len(), columns.len());
        assert_eq!(row[7], Value::Null);

        let basic = parse(BASIC_CSV).unwrap();
        assert_eq!(basic.columns().len(), 7);
        assert_eq!(basic.records()[0].to_row(false).len(), 7);
    }

    #[test]
    fn test_blank_display_cells_load_as_none() {
        let csv = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock
A,B,Ceiling,,110,2500,
C,D,Wall,40,90,3200,n/a
";
        let catalog = parse(csv).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.records()[0];
        assert_eq!(first.power_w, None);
        assert_eq!(first.stock, None);
        assert_eq!(first.price_thb, 2500.0);
        let row = first.to_row(false);
        assert_eq!(row[3], Value::Null);
        assert_eq!(row[6], Value::Null);

        let second = &catalog.records()[1];
        assert_eq!(second.power_w, Some(40.0));
        assert_eq!(second.stock, None);
    }

    #[test]
    fn test_float_stock_accepted() {
        let csv = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock
FR-10,Acme,Full-range,300.5,90x60,14500,4.0
";
        let catalog = parse(csv).unwrap();
        let record = &catalog.records()[0];
        assert_eq!(record.stock, Some(4.0));
        assert_eq!(record.power_w, Some(300.5));

        let row = record.to_row(false);
        assert_eq!(row[3], json!(300.5));
        assert_eq!(row[6], json!(4));
    }

    #[test]
    fn test_blank_price_still_fails() {
        let csv = "\
Model,Brand,Type,Power (W),Coverage Angle,Price (THB),Stock
CS-6,Acme,Ceiling,30,110,,40
";
        assert!(matches!(parse(csv), Err(Error::CatalogLoad { .. })));
    }
}
