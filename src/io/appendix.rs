//! Markdown appendix describing the rent regression.

use std::fs;
use std::path::Path;

use crate::domain::{Covariate, RegressionSnapshot, Term};
use crate::error::AppError;
use crate::io::export::ensure_parent_dir;
use crate::report::fmt_window;

/// Render the appendix as Markdown.
pub fn render_ols_report(snap: &RegressionSnapshot) -> String {
    let mut lines = vec![
        "# OLS Appendix — Housing Dynamics".to_string(),
        String::new(),
        "**Model:** `rent ~ const + income + transit + inverseAir`  ".to_string(),
        format!(
            "**Window:** {} (last {} years). **N:** {}",
            fmt_window(&snap.window_years),
            snap.window_years.len(),
            snap.observation_count
        ),
        format!(
            "**R²:** {:.4} (**Adj. R²:** {:.4}), **σ (resid):** {:.2}",
            snap.r2, snap.adjusted_r2, snap.residual_std
        ),
        String::new(),
        "## Coefficients".to_string(),
        "| term | coef | std err | t | p>|t| | 95% CI |".to_string(),
        "|---|---:|---:|---:|---:|---:|".to_string(),
    ];

    for term in Term::ALL {
        let ci = snap.confidence_intervals.get(term);
        lines.push(format!(
            "| {} | {:.4} | {:.4} | {:.3} | {:.4} | [{:.4}, {:.4}] |",
            term.name(),
            snap.coefficients.get(term),
            snap.standard_errors.get(term),
            snap.t_values.get(term),
            snap.p_values.get(term),
            ci.lower,
            ci.upper
        ));
    }

    let bp = snap.heteroscedasticity;
    let vif = Covariate::ALL
        .iter()
        .map(|&c| format!("{}: {:.2}", c.term().name(), snap.variance_inflation_factors.get(c)))
        .collect::<Vec<_>>()
        .join(", ");

    lines.extend([
        String::new(),
        format!(
            "Breusch–Pagan: LM = {:.2} (p = {}), F = {:.2} (p = {}).",
            bp.lm_stat,
            fmt_pvalue(bp.lm_pvalue),
            bp.f_stat,
            fmt_pvalue(bp.f_pvalue)
        ),
        format!("Variance Inflation Factors: {vif}."),
        String::new(),
        "Notes: observational data; possible omitted-variable bias; limited window captures recent dynamics."
            .to_string(),
    ]);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Plain decimals for ordinary p-values, scientific notation for tiny ones.
fn fmt_pvalue(p: f64) -> String {
    if p == 0.0 || p >= 1e-3 || p.is_nan() {
        format!("{p:.3}")
    } else {
        format!("{p:.3e}")
    }
}

/// Write the appendix to `path`, creating parent directories as needed.
pub fn write_ols_report(path: &Path, snap: &RegressionSnapshot) -> Result<(), AppError> {
    ensure_parent_dir(path)?;
    fs::write(path, render_ols_report(snap))
        .map_err(|e| AppError::output(format!("Failed to write OLS report '{}': {e}", path.display())))
}
