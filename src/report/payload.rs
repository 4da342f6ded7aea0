//! Visualization payload: per-region series as parallel arrays, a region × year
//! YoY heatmap, and one scatter point per panel row.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{PanelDataset, PanelRow, YoyEntry};

/// Smallest bubble radius in the scatter.
const MIN_BUBBLE_RADIUS: f64 = 4.0;
/// Transit score units per radius unit.
const TRANSIT_PER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
    pub year: Vec<i32>,
    pub median_rent: Vec<f64>,
    pub median_income: Vec<f64>,
    pub subway_access_score: Vec<f64>,
    pub air_quality_index: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Income.
    pub x: f64,
    /// Rent.
    pub y: f64,
    /// Bubble radius from transit score.
    pub r: f64,
    pub region: String,
    pub year: i32,
    pub subway: f64,
    pub air_quality_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub regions: Vec<String>,
    pub years: Vec<i32>,
    /// `matrix[region][year]`; `None` where no YoY percent exists.
    pub matrix: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VizPayload {
    pub generated_at: DateTime<Utc>,
    pub regions: Vec<String>,
    pub years: Vec<i32>,
    pub series: BTreeMap<String, RegionSeries>,
    pub scatter: Vec<ScatterPoint>,
    pub heatmap: Heatmap,
    pub latest_snapshot: Vec<PanelRow>,
    pub yoy: BTreeMap<String, Vec<YoyEntry>>,
}

pub fn bubble_radius(transit_score: f64) -> f64 {
    (transit_score / TRANSIT_PER_RADIUS).max(MIN_BUBBLE_RADIUS)
}

pub fn build_viz_payload(
    dataset: &PanelDataset,
    yoy: &BTreeMap<String, Vec<YoyEntry>>,
    ranking: &[PanelRow],
    generated_at: DateTime<Utc>,
) -> VizPayload {
    let regions: Vec<String> = dataset.region_names().into_iter().map(str::to_string).collect();
    let years = dataset.years();

    let series = dataset
        .regions()
        .map(|(region, rows)| {
            let col = |f: fn(&PanelRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();
            (
                region.to_string(),
                RegionSeries {
                    year: rows.iter().map(|r| r.year).collect(),
                    median_rent: col(|r| r.rent),
                    median_income: col(|r| r.income),
                    subway_access_score: col(|r| r.transit_score),
                    air_quality_index: col(|r| r.air_quality_index),
                },
            )
        })
        .collect();

    let matrix = regions
        .iter()
        .map(|region| {
            let lookup: BTreeMap<i32, f64> = yoy
                .get(region)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|e| e.percent_change.map(|p| (e.year, p)))
                        .collect()
                })
                .unwrap_or_default();
            years.iter().map(|y| lookup.get(y).copied()).collect()
        })
        .collect();

    let scatter = dataset
        .rows()
        .iter()
        .map(|r| ScatterPoint {
            x: r.income,
            y: r.rent,
            r: bubble_radius(r.transit_score),
            region: r.region.clone(),
            year: r.year,
            subway: r.transit_score,
            air_quality_index: r.air_quality_index,
        })
        .collect();

    VizPayload {
        generated_at,
        heatmap: Heatmap {
            regions: regions.clone(),
            years: years.clone(),
            matrix,
        },
        regions,
        years,
        series,
        scatter,
        latest_snapshot: ranking.to_vec(),
        yoy: yoy.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_yoy;
    use crate::report::latest_ranking;

    #[test]
    fn heatmap_has_null_cells_for_missing_and_first_years() {
        let ds = PanelDataset::new(vec![
            PanelRow::new("A", 2020, 100.0, 1.0, 8.0, 1.0),
            PanelRow::new("A", 2021, 110.0, 1.0, 40.0, 1.0),
            PanelRow::new("B", 2021, 200.0, 2.0, 20.0, 2.0),
        ])
        .unwrap();
        let yoy = compute_yoy(&ds);
        let payload = build_viz_payload(&ds, &yoy, &latest_ranking(&ds), Utc::now());

        assert_eq!(payload.regions, vec!["A", "B"]);
        assert_eq!(payload.years, vec![2020, 2021]);
        assert_eq!(payload.heatmap.matrix[0][0], None);
        assert!((payload.heatmap.matrix[0][1].unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(payload.heatmap.matrix[1], vec![None, None]);

        assert_eq!(payload.scatter.len(), 3);
        assert_eq!(payload.scatter[0].r, 4.0);
        assert_eq!(payload.scatter[1].r, 10.0);
        assert_eq!(payload.series["A"].median_rent, vec![100.0, 110.0]);
        assert_eq!(payload.latest_snapshot[0].region, "B");
    }
}
