//! Deterministic headline selection.
//!
//! Rules run in fixed order over already-computed metrics:
//!
//! 1. acceleration: the region with the largest non-null rent growth percent
//! 2. ceiling/floor: top vs bottom of the latest-year ranking
//! 3. driver: strongest pooled correlation alongside the largest regression
//!    coefficient (the two may disagree); with no defined correlation only the
//!    coefficient is reported
//!
//! "Largest" ties keep the first candidate in input order. Growth maps iterate
//! in region order, so results are reproducible for a given panel.

use std::collections::BTreeMap;

use crate::domain::{Correlations, Covariate, DisparityRecord, Evidence, GrowthRecord, Headline, PanelRow, RegressionSnapshot};

/// Everything the generator reads.
#[derive(Debug, Clone, Copy)]
pub struct HeadlineInputs<'a> {
    pub growth: &'a BTreeMap<String, GrowthRecord>,
    /// Latest-year rows, highest rent first.
    pub ranking: &'a [PanelRow],
    pub correlations: &'a Correlations,
    pub regression: &'a RegressionSnapshot,
    pub disparity: &'a BTreeMap<i32, DisparityRecord>,
}

/// Select up to three headlines.
///
/// Empty when there is no ranking or no region has a defined growth percent.
pub fn generate_headlines(inputs: &HeadlineInputs<'_>) -> Vec<Headline> {
    let Some(acceleration) = acceleration_headline(inputs.growth) else {
        return Vec::new();
    };
    let Some(ceiling) = ceiling_headline(inputs.ranking, inputs.disparity) else {
        return Vec::new();
    };

    let mut out = vec![acceleration, ceiling];
    out.extend(driver_headline(inputs.correlations, inputs.regression));
    out
}

fn acceleration_headline(growth: &BTreeMap<String, GrowthRecord>) -> Option<Headline> {
    let (region, record, pct) = first_max_by(
        growth
            .iter()
            .filter_map(|(region, g)| g.percent_change.map(|pct| (region, g, pct))),
        |(_, _, pct)| *pct,
    )?;

    Some(Headline {
        title: format!("{region} leads rent acceleration"),
        body: format!(
            "{region} rents climbed {pct:.1}% from {} to {}, marking the fastest region-scale gain.",
            record.start_year, record.end_year
        ),
        evidence: vec![Evidence::Number(Some(round_to(pct, 1)))],
        caveat: "Growth is percentage-based; a fast-growing region can still sit well below the price ceiling."
            .to_string(),
    })
}

fn ceiling_headline(ranking: &[PanelRow], disparity: &BTreeMap<i32, DisparityRecord>) -> Option<Headline> {
    let top = ranking.first()?;
    let bottom = ranking.last()?;
    let gap = top.rent - bottom.rent;
    let latest_spread = disparity.get(&top.year).map(|d| d.spread);

    let spread_phrase = match latest_spread {
        Some(_) => format!("{} above", format_dollars(gap)),
        None => "outpacing".to_string(),
    };

    Some(Headline {
        title: format!("{} remains the price ceiling", top.region),
        body: format!(
            "In {}, {} posts a median asking rent of {}, {spread_phrase} the floor region ({}).",
            top.year,
            top.region,
            format_dollars(top.rent),
            bottom.region
        ),
        evidence: vec![Evidence::Number(Some(top.rent)), Evidence::Number(latest_spread)],
        caveat: "Regional medians mask neighborhood heterogeneity and unit size mix.".to_string(),
    })
}

fn driver_headline(correlations: &Correlations, regression: &RegressionSnapshot) -> Option<Headline> {
    let pairs = [
        ("household income", correlations.rent_income),
        ("transit access", correlations.rent_subway),
        ("air quality (lower is better)", correlations.rent_air),
    ];
    let strongest = first_max_by(
        pairs.iter().filter_map(|&(label, r)| r.map(|r| (label, r))),
        |(_, r)| r.abs(),
    );

    let coefficients = regression.coefficients;
    let (driver, beta) = first_max_by(
        Covariate::ALL
            .iter()
            .map(|&c| (c.term().name(), coefficients.get(c.term()))),
        |(_, beta)| beta.abs(),
    )?;

    let weights = format!("regression weights point to {driver} as the dominant driver in recent years (β ≈ {beta:.4})");
    let (title, body) = match strongest {
        Some((label, r)) => (
            format!("{} alignment is strongest", capitalize(label)),
            format!(
                "Across {} region-year observations, rent moves with {label} (r = {r:.2}), while {weights}.",
                regression.observation_count
            ),
        ),
        None => (
            format!("Regression weights favor {driver}"),
            format!(
                "Across {} region-year observations, pooled correlations are unavailable, while {weights}.",
                regression.observation_count
            ),
        ),
    };

    Some(Headline {
        title,
        body,
        evidence: vec![Evidence::Correlations(*correlations), Evidence::Coefficients(coefficients)],
        caveat: "Regression is observational; omitted variables (building quality, policy shocks) remain."
            .to_string(),
    })
}

/// Maximum by `key`, keeping the first element on ties. NaN keys never win.
fn first_max_by<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(f64, T)> = None;
    for item in items {
        let k = key(&item);
        if k.is_nan() {
            continue;
        }
        let replace = match &best {
            Some((best_k, _)) => k > *best_k,
            None => true,
        };
        if replace {
            best = Some((k, item));
        }
    }
    best.map(|(_, item)| item)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// `$1,234` style, rounded to whole dollars.
fn format_dollars(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
