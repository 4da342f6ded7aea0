//! Pooled rent correlations.

use crate::domain::{Correlations, PanelDataset, PanelField};
use crate::math::pearson;

/// Pearson correlation of rent with each covariate over every row of the panel.
///
/// A pair is `None` when either side has zero variance.
pub fn compute_correlations(dataset: &PanelDataset) -> Correlations {
    let column = |field: PanelField| -> Vec<f64> { dataset.rows().iter().map(|r| field.value(r)).collect() };
    let rent = column(PanelField::Rent);

    Correlations {
        rent_income: pearson(&rent, &column(PanelField::Income)),
        rent_subway: pearson(&rent, &column(PanelField::TransitScore)),
        rent_air: pearson(&rent, &column(PanelField::AirQualityIndex)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PanelRow;

    #[test]
    fn pooled_correlations_with_constant_covariate() {
        let ds = PanelDataset::new(vec![
            PanelRow::new("A", 2020, 1_000.0, 40_000.0, 60.0, 50.0),
            PanelRow::new("A", 2021, 1_100.0, 44_000.0, 60.0, 45.0),
            PanelRow::new("B", 2020, 2_000.0, 80_000.0, 60.0, 30.0),
            PanelRow::new("B", 2021, 2_200.0, 88_000.0, 60.0, 25.0),
        ])
        .unwrap();
        let c = compute_correlations(&ds);

        assert!((c.rent_income.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(c.rent_subway, None);
        assert!(c.rent_air.unwrap() < 0.0);
    }

    #[test]
    fn constant_non_integer_covariate_is_null() {
        let rows = (0..7)
            .flat_map(|i| {
                let f = f64::from(i);
                [
                    PanelRow::new("A", 2017 + i, 1_000.0 + 40.0 * f, 40_000.0 + 900.0 * f, 72.1, 41.3 - 0.2 * f),
                    PanelRow::new("B", 2017 + i, 1_800.0 + 25.0 * f, 61_000.0 + 300.0 * f, 72.1, 38.0 + 0.1 * f),
                ]
            })
            .collect();
        let c = compute_correlations(&PanelDataset::new(rows).unwrap());

        assert_eq!(c.rent_subway, None);
        assert!(c.rent_income.is_some());
        assert!(c.rent_air.is_some());
    }
}
