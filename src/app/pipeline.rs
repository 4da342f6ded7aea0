//! Shared derive pipeline.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> metrics + regression -> ranking -> headlines -> artifacts
//!
//! `derive` is the pure part (dataset in, value tree out); `run_derive` adds
//! the file I/O around it.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{
    Correlations, DisparityRecord, GrowthRecord, Headline, PanelDataset, PanelField, PanelRow, PipelineConfig,
    RegressionSnapshot, YoyEntry,
};
use crate::error::AppError;
use crate::headlines::{HeadlineInputs, generate_headlines};
use crate::io::{check_sanity_bounds, load_panel, write_json, write_ols_report};
use crate::metrics::{compute_correlations, compute_disparity, compute_growth, compute_yoy};
use crate::regression::compute_regression;
use crate::report::{build_viz_payload, latest_ranking};

/// All computed outputs of a single run.
///
/// Serialized as-is, this is the derived summary artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub generated_at: DateTime<Utc>,
    pub latest_year: i32,
    pub rent_growth: BTreeMap<String, GrowthRecord>,
    pub income_growth: BTreeMap<String, GrowthRecord>,
    pub yoy: BTreeMap<String, Vec<YoyEntry>>,
    pub latest_rows: Vec<PanelRow>,
    pub correlations: Correlations,
    pub regression: RegressionSnapshot,
    pub disparity_index: BTreeMap<i32, DisparityRecord>,
    pub headlines: Vec<Headline>,
}

#[derive(Debug, Clone)]
struct Metrics {
    rent_growth: BTreeMap<String, GrowthRecord>,
    income_growth: BTreeMap<String, GrowthRecord>,
    yoy: BTreeMap<String, Vec<YoyEntry>>,
    disparity: BTreeMap<i32, DisparityRecord>,
    correlations: Correlations,
}

impl Metrics {
    fn compute(dataset: &PanelDataset) -> Self {
        Self {
            rent_growth: compute_growth(dataset, PanelField::Rent),
            income_growth: compute_growth(dataset, PanelField::Income),
            yoy: compute_yoy(dataset),
            disparity: compute_disparity(dataset),
            correlations: compute_correlations(dataset),
        }
    }
}

/// Compute every derived artifact from a validated dataset.
///
/// A failed regression aborts the whole derivation.
pub fn derive(dataset: &PanelDataset, generated_at: DateTime<Utc>) -> Result<RunOutput, AppError> {
    // Calculators only share the immutable dataset; headlines wait for both.
    let (metrics, regression) = rayon::join(|| Metrics::compute(dataset), || compute_regression(dataset));
    let regression = regression?;
    let latest_rows = latest_ranking(dataset);

    let headlines = generate_headlines(&HeadlineInputs {
        growth: &metrics.rent_growth,
        ranking: &latest_rows,
        correlations: &metrics.correlations,
        regression: &regression,
        disparity: &metrics.disparity,
    });

    Ok(RunOutput {
        generated_at,
        latest_year: dataset.latest_year(),
        rent_growth: metrics.rent_growth,
        income_growth: metrics.income_growth,
        yoy: metrics.yoy,
        latest_rows,
        correlations: metrics.correlations,
        regression,
        disparity_index: metrics.disparity,
        headlines,
    })
}

/// Load the panel, derive everything, and write the three artifacts.
pub fn run_derive(config: &PipelineConfig) -> Result<RunOutput, AppError> {
    let dataset = load_panel(&config.data_path)?;
    info!(
        rows = dataset.len(),
        regions = dataset.region_names().len(),
        latest_year = dataset.latest_year(),
        "loaded panel from {}",
        config.data_path.display()
    );

    let generated_at = Utc::now();
    let run = derive(&dataset, generated_at)?;
    info!(
        window = ?run.regression.window_years,
        nobs = run.regression.observation_count,
        r2 = run.regression.r2,
        headlines = run.headlines.len(),
        "derived analytics"
    );

    let viz = build_viz_payload(&dataset, &run.yoy, &run.latest_rows, generated_at);

    write_json(&config.derived_out, &run)?;
    info!("wrote {}", config.derived_out.display());
    write_json(&config.payload_out, &viz)?;
    info!("wrote {}", config.payload_out.display());
    write_ols_report(&config.appendix_out, &run.regression)?;
    info!("updated {}", config.appendix_out.display());

    Ok(run)
}

/// Ingest the panel and apply sanity bounds.
///
/// Every violation is logged; any violation fails with a schema error.
pub fn run_validate(data_path: &Path) -> Result<PanelDataset, AppError> {
    let dataset = load_panel(data_path)?;
    let violations = check_sanity_bounds(&dataset);
    for v in &violations {
        warn!("{v}");
    }
    if !violations.is_empty() {
        return Err(AppError::schema(format!(
            "{} value(s) fall outside sanity bounds.",
            violations.len()
        )));
    }
    info!(rows = dataset.len(), "basic checks OK");
    Ok(dataset)
}
