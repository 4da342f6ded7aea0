//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between calculators during a run
//! - exported to the derived summary / visualization JSON
//! - rendered into the Markdown appendix and terminal summary
//!
//! "Unavailable" values are `Option::None` (serialized as `null`), never zero.

use std::path::PathBuf;

use serde::Serialize;

/// First-to-last-year change for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    pub start_year: i32,
    pub end_year: i32,
    pub start_value: f64,
    pub end_value: f64,
    pub absolute_change: f64,
    /// `None` when `start_value == 0`.
    pub percent_change: Option<f64>,
}

/// One point of a region's year-over-year rent series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoyEntry {
    pub year: i32,
    pub value: f64,
    /// `None` for the first row of a series or when the prior value is zero.
    pub percent_change: Option<f64>,
}

/// Cross-region rent range for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisparityRecord {
    pub max: f64,
    pub min: f64,
    pub spread: f64,
}

/// Pooled Pearson correlations between rent and each covariate.
///
/// The air-quality pair uses the raw index, not the inverted regression term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlations {
    pub rent_income: Option<f64>,
    pub rent_subway: Option<f64>,
    pub rent_air: Option<f64>,
}

/// Estimated terms of the fixed rent model, in design-matrix column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Intercept,
    Income,
    Transit,
    InverseAir,
}

impl Term {
    pub const ALL: [Term; 4] = [Term::Intercept, Term::Income, Term::Transit, Term::InverseAir];

    pub fn name(self) -> &'static str {
        match self {
            Term::Intercept => "intercept",
            Term::Income => "income",
            Term::Transit => "transit",
            Term::InverseAir => "inverseAir",
        }
    }
}

/// Non-intercept terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Covariate {
    Income,
    Transit,
    InverseAir,
}

impl Covariate {
    pub const ALL: [Covariate; 3] = [Covariate::Income, Covariate::Transit, Covariate::InverseAir];

    pub fn term(self) -> Term {
        match self {
            Covariate::Income => Term::Income,
            Covariate::Transit => Term::Transit,
            Covariate::InverseAir => Term::InverseAir,
        }
    }

    /// Zero-based position among the covariate columns (design column minus one).
    pub fn index(self) -> usize {
        match self {
            Covariate::Income => 0,
            Covariate::Transit => 1,
            Covariate::InverseAir => 2,
        }
    }
}

/// One value per model term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TermValues<T> {
    pub intercept: T,
    pub income: T,
    pub transit: T,
    #[serde(rename = "inverseAir")]
    pub inverse_air: T,
}

impl<T: Copy> TermValues<T> {
    /// Build by evaluating `f` once per term.
    pub fn from_fn(mut f: impl FnMut(Term) -> T) -> Self {
        Self {
            intercept: f(Term::Intercept),
            income: f(Term::Income),
            transit: f(Term::Transit),
            inverse_air: f(Term::InverseAir),
        }
    }

    pub fn get(&self, term: Term) -> T {
        match term {
            Term::Intercept => self.intercept,
            Term::Income => self.income,
            Term::Transit => self.transit,
            Term::InverseAir => self.inverse_air,
        }
    }
}

/// One value per non-intercept term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CovariateValues<T> {
    pub income: T,
    pub transit: T,
    #[serde(rename = "inverseAir")]
    pub inverse_air: T,
}

impl<T: Copy> CovariateValues<T> {
    pub fn from_fn(mut f: impl FnMut(Covariate) -> T) -> Self {
        Self {
            income: f(Covariate::Income),
            transit: f(Covariate::Transit),
            inverse_air: f(Covariate::InverseAir),
        }
    }

    pub fn get(&self, covariate: Covariate) -> T {
        match covariate {
            Covariate::Income => self.income,
            Covariate::Transit => self.transit,
            Covariate::InverseAir => self.inverse_air,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Breusch–Pagan heteroscedasticity test, LM and F forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreuschPagan {
    pub lm_stat: f64,
    pub lm_pvalue: f64,
    pub f_stat: f64,
    pub f_pvalue: f64,
}

/// Fit + diagnostics for the fixed rent model over the trailing window.
///
/// Field names on the wire follow the derived-summary schema
/// (`stderr`, `residualStd`, `window_years`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionSnapshot {
    pub coefficients: TermValues<f64>,
    #[serde(rename = "stderr")]
    pub standard_errors: TermValues<f64>,
    #[serde(rename = "tvalues")]
    pub t_values: TermValues<f64>,
    #[serde(rename = "pvalues")]
    pub p_values: TermValues<f64>,
    pub confidence_intervals: TermValues<ConfidenceInterval>,
    pub r2: f64,
    #[serde(rename = "adj_r2")]
    pub adjusted_r2: f64,
    #[serde(rename = "residualStd")]
    pub residual_std: f64,
    #[serde(rename = "nobs")]
    pub observation_count: usize,
    #[serde(rename = "vif")]
    pub variance_inflation_factors: CovariateValues<f64>,
    #[serde(rename = "breusch_pagan")]
    pub heteroscedasticity: BreuschPagan,
    pub window_years: Vec<i32>,
}

/// A literal value substantiating a headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Evidence {
    Number(Option<f64>),
    Correlations(Correlations),
    Coefficients(TermValues<f64>),
}

/// A rule-selected narrative summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub title: String,
    pub body: String,
    pub evidence: Vec<Evidence>,
    pub caveat: String,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags / environment (plus defaults). Core modules
/// never look at paths; only the pipeline and writers do.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub derived_out: PathBuf,
    pub payload_out: PathBuf,
    pub appendix_out: PathBuf,
    /// Print the terminal summary after writing artifacts.
    pub print_summary: bool,
}
