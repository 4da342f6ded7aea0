//! CSV ingest and validation.
//!
//! This module is responsible for turning the source CSV into a validated
//! `PanelDataset`. It is the only place column names are looked at.
//!
//! Design goals:
//! - **Strict schema**: every required column must exist (clear errors + exit code 2)
//! - **Strict rows**: an unparseable value fails the run with its line number
//! - **Deterministic behavior**: the dataset is sorted by region, then year
//! - **Separation of concerns**: no metric or regression logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{PanelDataset, PanelRow};
use crate::error::AppError;

/// Accepted names for the region column, in lookup order.
const REGION_COLUMNS: [&str; 2] = ["borough", "region"];

/// Numeric columns every input must carry.
const NUMERIC_COLUMNS: [&str; 5] = [
    "year",
    "median_rent",
    "median_income",
    "subway_access_score",
    "air_quality_index",
];

/// Plausible range for `median_rent`.
pub const RENT_BOUNDS: (f64, f64) = (200.0, 10_000.0);
/// Plausible range for `median_income`.
pub const INCOME_BOUNDS: (f64, f64) = (10_000.0, 300_000.0);
/// Calendar years accepted in the `year` column.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Load and validate the panel CSV at `path`.
pub fn load_panel(path: &Path) -> Result<PanelDataset, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::missing_input(format!("Missing source CSV at '{}': {e}", path.display())))?;
    read_panel(file)
}

/// Parse and validate a panel CSV from any reader.
///
/// Lines starting with `#` are comments.
pub fn read_panel<R: Read>(reader: R) -> Result<PanelDataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::schema(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&build_header_map(&headers))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::schema(format!("CSV parse error: {e}")))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row = parse_row(&record, &columns).map_err(|e| AppError::schema(format!("line {line}: {e}")))?;
        rows.push(row);
    }

    PanelDataset::new(rows)
}

/// A value outside its plausible range.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundViolation {
    pub region: String,
    pub year: i32,
    pub column: &'static str,
    pub value: f64,
}

impl std::fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {} = {} is out of bounds", self.region, self.year, self.column, self.value)
    }
}

/// Rent and income sanity checks.
pub fn check_sanity_bounds(dataset: &PanelDataset) -> Vec<BoundViolation> {
    let checks: [(&'static str, (f64, f64), fn(&PanelRow) -> f64); 2] = [
        ("median_rent", RENT_BOUNDS, |r| r.rent),
        ("median_income", INCOME_BOUNDS, |r| r.income),
    ];

    let mut out = Vec::new();
    for row in dataset.rows() {
        for (column, (lo, hi), get) in checks {
            let value = get(row);
            if !(lo..=hi).contains(&value) {
                out.push(BoundViolation {
                    region: row.region.clone(),
                    year: row.year,
                    column,
                    value,
                });
            }
        }
    }
    out
}

/// Column indices for the fields of a `PanelRow`.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    region: usize,
    year: usize,
    rent: usize,
    income: usize,
    transit: usize,
    air: usize,
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<ColumnMap, AppError> {
    let region = REGION_COLUMNS
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| AppError::schema("Missing required column: `borough` (or `region`)"))?;

    let missing: Vec<&str> = NUMERIC_COLUMNS
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::schema(format!("Missing expected columns: {missing:?}")));
    }

    Ok(ColumnMap {
        region,
        year: header_map["year"],
        rent: header_map["median_rent"],
        income: header_map["median_income"],
        transit: header_map["subway_access_score"],
        air: header_map["air_quality_index"],
    })
}

fn parse_row(record: &StringRecord, columns: &ColumnMap) -> Result<PanelRow, String> {
    let region = get_required(record, columns.region, "region")?.to_string();
    let year = parse_year(get_required(record, columns.year, "year")?)?;

    Ok(PanelRow {
        region,
        year,
        rent: parse_f64(get_required(record, columns.rent, "median_rent")?, "median_rent")?,
        income: parse_f64(get_required(record, columns.income, "median_income")?, "median_income")?,
        transit_score: parse_f64(
            get_required(record, columns.transit, "subway_access_score")?,
            "subway_access_score",
        )?,
        air_quality_index: parse_f64(
            get_required(record, columns.air, "air_quality_index")?,
            "air_quality_index",
        )?,
    })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_year(s: &str) -> Result<i32, String> {
    let invalid = || format!("Invalid `year` value '{s}'.");
    let year = match s.parse::<i32>() {
        Ok(y) => y,
        // Tolerate `2021.0` style exports.
        Err(_) => {
            let v = s.parse::<f64>().map_err(|_| invalid())?;
            if v.fract() != 0.0 || !(f64::from(MIN_YEAR)..=f64::from(MAX_YEAR)).contains(&v) {
                return Err(invalid());
            }
            v as i32
        }
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!("`year` value {year} is outside {MIN_YEAR}..={MAX_YEAR}."));
    }
    Ok(year)
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid `{name}` value '{s}'.")),
    }
}
