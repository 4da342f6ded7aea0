//! The validated region × year panel.
//!
//! Ingestion hands the core a `PanelDataset`; everything downstream reads it by
//! shared reference. The constructor is the only place invariants are checked:
//!
//! - at least one row
//! - every numeric field finite
//! - unique `(region, year)` keys
//! - rows sorted by region, then year

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AppError;

/// One observation: a region's indicators for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub region: String,
    pub year: i32,
    #[serde(rename = "median_rent")]
    pub rent: f64,
    #[serde(rename = "median_income")]
    pub income: f64,
    #[serde(rename = "subway_access_score")]
    pub transit_score: f64,
    pub air_quality_index: f64,
}

impl PanelRow {
    pub fn new(
        region: impl Into<String>,
        year: i32,
        rent: f64,
        income: f64,
        transit_score: f64,
        air_quality_index: f64,
    ) -> Self {
        Self {
            region: region.into(),
            year,
            rent,
            income,
            transit_score,
            air_quality_index,
        }
    }

    fn is_finite(&self) -> bool {
        [self.rent, self.income, self.transit_score, self.air_quality_index]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Numeric column selector for calculators that work on "any indicator".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Rent,
    Income,
    TransitScore,
    AirQualityIndex,
}

impl PanelField {
    pub fn value(self, row: &PanelRow) -> f64 {
        match self {
            PanelField::Rent => row.rent,
            PanelField::Income => row.income,
            PanelField::TransitScore => row.transit_score,
            PanelField::AirQualityIndex => row.air_quality_index,
        }
    }
}

/// Sorted, de-duplicated, non-empty collection of panel rows.
#[derive(Debug, Clone)]
pub struct PanelDataset {
    rows: Vec<PanelRow>,
}

impl PanelDataset {
    /// Validate and sort rows into a dataset.
    pub fn new(mut rows: Vec<PanelRow>) -> Result<Self, AppError> {
        if rows.is_empty() {
            return Err(AppError::insufficient_data("Panel dataset contains no rows."));
        }

        if let Some(bad) = rows.iter().find(|r| !r.is_finite()) {
            return Err(AppError::schema(format!(
                "Non-finite value for region '{}' in {}.",
                bad.region, bad.year
            )));
        }

        rows.sort_by(|a, b| a.region.cmp(&b.region).then(a.year.cmp(&b.year)));

        if let Some(pair) = rows
            .windows(2)
            .find(|w| w[0].region == w[1].region && w[0].year == w[1].year)
        {
            return Err(AppError::schema(format!(
                "Duplicate region-year combination: {} {}.",
                pair[0].region, pair[0].year
            )));
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-region slices in region order; each slice is in year order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &[PanelRow])> {
        self.rows
            .chunk_by(|a, b| a.region == b.region)
            .map(|chunk| (chunk[0].region.as_str(), chunk))
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.regions().map(|(name, _)| name).collect()
    }

    /// Distinct years present anywhere in the panel, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn latest_year(&self) -> i32 {
        // Non-empty by construction.
        self.rows.iter().map(|r| r.year).max().unwrap_or_default()
    }

    pub fn rows_in_year(&self, year: i32) -> impl Iterator<Item = &PanelRow> {
        self.rows.iter().filter(move |r| r.year == year)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Five regions over 2017–2023 with covariates that are far from collinear
    /// and rent built from a known linear rule plus deterministic noise.
    pub fn sample_panel() -> PanelDataset {
        let regions = ["Bronx", "Brooklyn", "Manhattan", "Queens", "Staten Island"];
        let mut rows = Vec::new();
        for (r, name) in regions.iter().enumerate() {
            for t in 0..7 {
                let (rf, tf) = (r as f64, t as f64);
                let income = 40_000.0 + 1_500.0 * rf + 900.0 * tf + ((r * 3 + t * 5) % 7) as f64 * 120.0;
                let transit = 50.0 + 5.0 * rf - 0.7 * tf + ((r + 2 * t) % 3) as f64;
                let air = 40.0 + 2.0 * rf + 0.5 * tf + ((r * t) % 4) as f64;
                let noise = (((r * 5 + t * 3) % 9) as f64 - 4.0) * 15.0;
                let rent = 500.0 + 0.03 * income + 12.0 * transit + 4.0 * (100.0 - air) + noise;
                rows.push(PanelRow::new(*name, 2017 + t as i32, rent, income, transit, air));
            }
        }
        PanelDataset::new(rows).unwrap()
    }
}
