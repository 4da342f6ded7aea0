//! Window selection and design construction for the fixed rent model.
//!
//! ```text
//! rent = β0 + β1·income + β2·transit + β3·(100 − air_quality_index) + ε
//! ```
//!
//! Air quality enters inverted so that every covariate is expected to move
//! with rent in the same direction.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Covariate, PanelDataset, PanelRow, Term};
use crate::error::AppError;
use crate::math::{is_constant, with_intercept};

/// Number of trailing years (inclusive of the latest) used for the fit.
pub const WINDOW_YEARS: i32 = 5;

/// Ceiling of the air-quality scale; the model uses `AIR_QUALITY_CEILING - index`.
pub const AIR_QUALITY_CEILING: f64 = 100.0;

/// Rows and years inside the trailing window.
#[derive(Debug, Clone)]
pub struct RegressionWindow<'a> {
    pub years: Vec<i32>,
    pub rows: Vec<&'a PanelRow>,
}

/// Rows with `year >= latest - (WINDOW_YEARS - 1)`.
///
/// Shorter histories simply contribute fewer years.
pub fn select_window(dataset: &PanelDataset) -> Result<RegressionWindow<'_>, AppError> {
    let first_year = dataset.latest_year().saturating_sub(WINDOW_YEARS - 1);
    let years: Vec<i32> = dataset.years().into_iter().filter(|&y| y >= first_year).collect();
    let rows: Vec<&PanelRow> = dataset.rows().iter().filter(|r| r.year >= first_year).collect();

    if rows.is_empty() {
        return Err(AppError::insufficient_data("Insufficient data for regression window."));
    }
    Ok(RegressionWindow { years, rows })
}

/// Design for the fixed model.
#[derive(Debug, Clone)]
pub struct Design {
    /// Covariates only, in `Covariate::ALL` order.
    pub covariates: DMatrix<f64>,
    /// Intercept column followed by the covariates (`Term::ALL` order).
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

pub fn covariate_value(row: &PanelRow, covariate: Covariate) -> f64 {
    match covariate {
        Covariate::Income => row.income,
        Covariate::Transit => row.transit_score,
        Covariate::InverseAir => AIR_QUALITY_CEILING - row.air_quality_index,
    }
}

/// Column of `term` in the full design matrix.
pub fn term_column(term: Term) -> usize {
    match term {
        Term::Intercept => 0,
        Term::Income => 1,
        Term::Transit => 2,
        Term::InverseAir => 3,
    }
}

/// Build the design, rejecting covariates with no variation in the window.
pub fn build_design(window: &RegressionWindow<'_>) -> Result<Design, AppError> {
    let n = window.rows.len();

    for covariate in Covariate::ALL {
        let values: Vec<f64> = window.rows.iter().map(|r| covariate_value(r, covariate)).collect();
        if is_constant(&values) {
            return Err(AppError::insufficient_data(format!(
                "Covariate `{}` has zero variance in the regression window.",
                covariate.term().name()
            )));
        }
    }

    let covariates = DMatrix::from_fn(n, Covariate::ALL.len(), |i, j| {
        covariate_value(window.rows[i], Covariate::ALL[j])
    });
    let x = with_intercept(&covariates);
    let y = DVector::from_iterator(n, window.rows.iter().map(|r| r.rent));

    Ok(Design { covariates, x, y })
}
