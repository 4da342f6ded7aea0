//! Cross-region rent disparity per year.

use std::collections::BTreeMap;

use crate::domain::{DisparityRecord, PanelDataset};

/// Max, min and spread of rent across every region reporting in each year.
///
/// Years with no rows never appear; a year with one region has `spread == 0`.
pub fn compute_disparity(dataset: &PanelDataset) -> BTreeMap<i32, DisparityRecord> {
    let mut out: BTreeMap<i32, DisparityRecord> = BTreeMap::new();
    for row in dataset.rows() {
        out.entry(row.year)
            .and_modify(|d| {
                d.max = d.max.max(row.rent);
                d.min = d.min.min(row.rent);
            })
            .or_insert(DisparityRecord {
                max: row.rent,
                min: row.rent,
                spread: 0.0,
            });
    }
    for d in out.values_mut() {
        d.spread = d.max - d.min;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PanelRow;

    #[test]
    fn spread_is_max_minus_min() {
        let ds = PanelDataset::new(vec![
            PanelRow::new("A", 2020, 1_200.0, 1.0, 1.0, 1.0),
            PanelRow::new("B", 2020, 3_000.0, 1.0, 1.0, 1.0),
            PanelRow::new("C", 2020, 1_800.0, 1.0, 1.0, 1.0),
            PanelRow::new("A", 2021, 1_300.0, 1.0, 1.0, 1.0),
        ])
        .unwrap();
        let disparity = compute_disparity(&ds);

        let d = disparity[&2020];
        assert_eq!((d.max, d.min, d.spread), (3_000.0, 1_200.0, 1_800.0));

        let single = disparity[&2021];
        assert_eq!(single.spread, 0.0);

        for d in disparity.values() {
            assert_eq!(d.spread, d.max - d.min);
            assert!(d.spread >= 0.0);
        }
    }
}
