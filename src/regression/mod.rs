//! The fixed rent regression and its diagnostic suite.
//!
//! Responsibilities:
//!
//! - select the trailing window and build the design (`model`)
//! - fit by OLS and derive inference, VIF and Breusch–Pagan (`diagnostics`)
//! - assemble the immutable `RegressionSnapshot`

pub mod diagnostics;
pub mod model;

pub use diagnostics::*;
pub use model::*;

use tracing::debug;

use crate::domain::{PanelDataset, RegressionSnapshot, TermValues};
use crate::error::AppError;
use crate::math::fit_ols;

/// Fit `rent ~ intercept + income + transit + inverseAir` over the trailing
/// window and compute every diagnostic.
pub fn compute_regression(dataset: &PanelDataset) -> Result<RegressionSnapshot, AppError> {
    let window = select_window(dataset)?;
    let design = build_design(&window)?;

    let fit = fit_ols(&design.x, &design.y)?;
    let n = fit.n;
    let k = fit.k;

    let inference = coefficient_inference(&fit)?;
    let r2 = fit.r_squared();
    let adjusted_r2 = 1.0 - (1.0 - r2) * (n as f64 - 1.0) / fit.df_resid() as f64;
    let residual_std = fit.sigma2().sqrt();

    let vif = variance_inflation_factors(&design.covariates)?;
    let heteroscedasticity = breusch_pagan(&design.x, &fit.residuals)?;

    debug!(
        n,
        k,
        r2,
        residual_std,
        bp_lm = heteroscedasticity.lm_stat,
        "fitted rent regression"
    );

    Ok(RegressionSnapshot {
        coefficients: TermValues::from_fn(|t| fit.beta[term_column(t)]),
        standard_errors: inference.standard_errors,
        t_values: inference.t_values,
        p_values: inference.p_values,
        confidence_intervals: inference.confidence_intervals,
        r2,
        adjusted_r2,
        residual_std,
        observation_count: n,
        variance_inflation_factors: vif,
        heteroscedasticity,
        window_years: window.years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::fixtures::sample_panel;
    use crate::domain::{Covariate, PanelRow, Term};
    use crate::error::ErrorKind;

    #[test]
    fn sample_panel_snapshot_is_well_formed() {
        let snap = compute_regression(&sample_panel()).unwrap();

        assert_eq!(snap.window_years, vec![2019, 2020, 2021, 2022, 2023]);
        assert_eq!(snap.observation_count, 25);
        assert!((0.0..=1.0).contains(&snap.r2));
        assert!(snap.adjusted_r2 <= snap.r2);
        assert!(snap.residual_std > 0.0);

        for term in Term::ALL {
            let coef = snap.coefficients.get(term);
            let ci = snap.confidence_intervals.get(term);
            let p = snap.p_values.get(term);
            assert!(ci.lower <= coef && coef <= ci.upper, "{term:?} CI must contain the estimate");
            assert!((0.0..=1.0).contains(&p));
            let t = snap.t_values.get(term);
            assert!((t - coef / snap.standard_errors.get(term)).abs() < 1e-9 * t.abs().max(1.0));
        }
        for c in Covariate::ALL {
            assert!(snap.variance_inflation_factors.get(c) >= 1.0);
        }
        let bp = snap.heteroscedasticity;
        assert!(bp.lm_stat >= 0.0 && (0.0..=1.0).contains(&bp.lm_pvalue));
        assert!(bp.f_stat >= 0.0 && (0.0..=1.0).contains(&bp.f_pvalue));
    }

    #[test]
    fn refit_is_bit_identical() {
        let ds = sample_panel();
        let a = compute_regression(&ds).unwrap();
        let b = compute_regression(&ds).unwrap();
        for term in Term::ALL {
            assert_eq!(a.coefficients.get(term).to_bits(), b.coefficients.get(term).to_bits());
        }
    }

    #[test]
    fn residual_std_matches_rss() {
        let ds = sample_panel();
        let snap = compute_regression(&ds).unwrap();
        let window = select_window(&ds).unwrap();

        let rss: f64 = window
            .rows
            .iter()
            .map(|r| {
                let fitted = snap.coefficients.intercept
                    + snap.coefficients.income * r.income
                    + snap.coefficients.transit * r.transit_score
                    + snap.coefficients.inverse_air * (100.0 - r.air_quality_index);
                (r.rent - fitted).powi(2)
            })
            .sum();
        let expected = (rss / (snap.observation_count - 4) as f64).sqrt();
        assert!((snap.residual_std - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn too_few_observations_is_insufficient_data() {
        // One region, four years: n = 4 = k.
        let rows = (0..4)
            .map(|i| {
                let f = i as f64;
                PanelRow::new("Solo", 2020 + i, 1_000.0 + 10.0 * f, 40_000.0 + f * f * 50.0, 50.0 + f, 40.0 - f * 0.3)
            })
            .collect();
        let ds = PanelDataset::new(rows).unwrap();
        let err = compute_regression(&ds).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn zero_variance_covariate_is_insufficient_data() {
        let rows = sample_panel()
            .rows()
            .iter()
            .map(|r| PanelRow { transit_score: 55.0, ..r.clone() })
            .collect();
        let ds = PanelDataset::new(rows).unwrap();
        let err = compute_regression(&ds).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }
}
