//! Inference and diagnostics on a fitted OLS model.
//!
//! - standard errors from `σ² · (XᵀX)⁻¹`, t-values, two-sided p-values on
//!   `t(n − k)`, and 95% confidence intervals
//! - variance inflation factors via auxiliary regressions (with intercept)
//! - Breusch–Pagan: squared residuals regressed on the original design,
//!   reported as `n · R²` on `χ²(k − 1)` and as the auxiliary F-test

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};

use crate::domain::{BreuschPagan, ConfidenceInterval, Covariate, CovariateValues, TermValues};
use crate::error::AppError;
use crate::math::{OlsFit, fit_ols, with_intercept};
use crate::regression::model::term_column;

/// Two-sided confidence level for coefficient intervals.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Per-term inference outputs.
#[derive(Debug, Clone)]
pub struct CoefficientInference {
    pub standard_errors: TermValues<f64>,
    pub t_values: TermValues<f64>,
    pub p_values: TermValues<f64>,
    pub confidence_intervals: TermValues<ConfidenceInterval>,
}

/// Standard errors, t/p-values and confidence intervals for every term.
pub fn coefficient_inference(fit: &OlsFit) -> Result<CoefficientInference, AppError> {
    let df = fit.df_resid() as f64;
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AppError::insufficient_data(format!("Invalid t-distribution (df={df}): {e}")))?;
    let t_crit = t_dist.inverse_cdf(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
    let sigma2 = fit.sigma2();

    let se = |col: usize| {
        let var = sigma2 * fit.xtx_inv[(col, col)];
        if var >= 0.0 { var.sqrt() } else { f64::NAN }
    };

    let standard_errors = TermValues::from_fn(|t| se(term_column(t)));
    let t_values = TermValues::from_fn(|t| fit.beta[term_column(t)] / standard_errors.get(t));
    let p_values = TermValues::from_fn(|t| 2.0 * upper_tail(&t_dist, t_values.get(t).abs()));
    let confidence_intervals = TermValues::from_fn(|t| {
        let coef = fit.beta[term_column(t)];
        let margin = t_crit * standard_errors.get(t);
        ConfidenceInterval {
            lower: coef - margin,
            upper: coef + margin,
        }
    });

    Ok(CoefficientInference {
        standard_errors,
        t_values,
        p_values,
        confidence_intervals,
    })
}

/// VIF for each covariate: `1 / (1 − R²)` of that covariate regressed on the
/// others plus an intercept.
///
/// Perfect collinearity yields `+∞`; values are floored at 1.
pub fn variance_inflation_factors(covariates: &DMatrix<f64>) -> Result<CovariateValues<f64>, AppError> {
    let mut vif = [1.0; 3];
    for covariate in Covariate::ALL {
        let j = covariate.index();
        let target: DVector<f64> = covariates.column(j).into_owned();
        let others = with_intercept(&covariates.clone().remove_column(j));

        let r2 = fit_ols(&others, &target)?.r_squared();
        if r2.is_nan() {
            return Err(AppError::insufficient_data(format!(
                "Cannot compute VIF for `{}`: covariate has zero variance.",
                covariate.term().name()
            )));
        }
        vif[j] = if r2 < 1.0 { (1.0 / (1.0 - r2)).max(1.0) } else { f64::INFINITY };
    }
    Ok(CovariateValues::from_fn(|c| vif[c.index()]))
}

/// Breusch–Pagan test of `residuals` against design `x` (intercept included).
pub fn breusch_pagan(x: &DMatrix<f64>, residuals: &DVector<f64>) -> Result<BreuschPagan, AppError> {
    let squared = residuals.map(|e| e * e);
    let aux = fit_ols(x, &squared)?;

    let n = aux.n as f64;
    let df_model = (aux.k - 1) as f64;
    let df_resid = aux.df_resid() as f64;
    let r2 = aux.r_squared();

    let lm_stat = n * r2;
    let f_stat = (r2 / df_model) / ((1.0 - r2) / df_resid);

    let chi2 = ChiSquared::new(df_model)
        .map_err(|e| AppError::insufficient_data(format!("Invalid chi-square distribution: {e}")))?;
    let f_dist = FisherSnedecor::new(df_model, df_resid)
        .map_err(|e| AppError::insufficient_data(format!("Invalid F distribution: {e}")))?;

    Ok(BreuschPagan {
        lm_stat,
        lm_pvalue: upper_tail(&chi2, lm_stat),
        f_stat,
        f_pvalue: upper_tail(&f_dist, f_stat),
    })
}

/// `P(X > x)`, passing NaN through and mapping `+∞` to zero.
fn upper_tail<D: ContinuousCDF<f64, f64>>(dist: &D, x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x == f64::INFINITY {
        0.0
    } else {
        dist.sf(x)
    }
}
