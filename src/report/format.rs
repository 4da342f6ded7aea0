//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math and metric code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{Covariate, PanelRow, RegressionSnapshot, Term};

/// Format the full run summary (ranking + regression + headlines).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== insights - Housing Panel Derivation ===\n");
    out.push_str(&format!("Latest year: {}\n", run.latest_year));
    out.push_str(&format!(
        "Regions: {} | YoY series: {}\n",
        run.rent_growth.len(),
        run.yoy.len()
    ));

    out.push_str("\nLatest-year ranking:\n");
    out.push_str(&format_ranking(&run.latest_rows));

    out.push_str("\nRegression:\n");
    out.push_str(&format_regression(&run.regression));

    out.push_str("\nHeadlines:\n");
    if run.headlines.is_empty() {
        out.push_str("  (none)\n");
    }
    for h in &run.headlines {
        out.push_str(&format!("- {}\n  {}\n", h.title, h.body));
    }

    out
}

fn format_ranking(rows: &[PanelRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<20} {:>10} {:>12} {:>8} {:>8}\n", "region", "rent", "income", "transit", "air"));
    out.push_str(&format!("{:-<20} {:-<10} {:-<12} {:-<8} {:-<8}\n", "", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:<20} {:>10.0} {:>12.0} {:>8.1} {:>8.1}\n",
            r.region, r.rent, r.income, r.transit_score, r.air_quality_index
        ));
    }
    out
}

fn format_regression(snap: &RegressionSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "- window: {} | n={} | R²={:.4} (adj {:.4}) | σ={:.2}\n",
        fmt_window(&snap.window_years),
        snap.observation_count,
        snap.r2,
        snap.adjusted_r2,
        snap.residual_std
    ));
    for term in Term::ALL {
        out.push_str(&format!(
            "  {:<11} β={:>12.4} se={:>10.4} p={:.4}\n",
            term.name(),
            snap.coefficients.get(term),
            snap.standard_errors.get(term),
            snap.p_values.get(term)
        ));
    }
    let vif = Covariate::ALL
        .iter()
        .map(|&c| format!("{}={:.2}", c.term().name(), snap.variance_inflation_factors.get(c)))
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("- VIF: {vif}\n"));
    out.push_str(&format!(
        "- Breusch–Pagan: LM={:.2} (p={:.3})\n",
        snap.heteroscedasticity.lm_stat, snap.heteroscedasticity.lm_pvalue
    ));
    out
}

/// `2019–2023`, or `2023` for a one-year window.
pub fn fmt_window(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}–{last}"),
        (Some(only), _) => only.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_formatting() {
        assert_eq!(fmt_window(&[2019, 2020, 2021]), "2019–2021");
        assert_eq!(fmt_window(&[2023]), "2023");
        assert_eq!(fmt_window(&[]), "-");
    }

    #[test]
    fn ranking_table_lists_every_row() {
        let rows = vec![
            PanelRow::new("Manhattan", 2023, 4_200.0, 90_000.0, 95.0, 38.0),
            PanelRow::new("Bronx", 2023, 1_900.0, 42_000.0, 70.0, 45.0),
        ];
        let table = format_ranking(&rows);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("Manhattan"));
    }
}
