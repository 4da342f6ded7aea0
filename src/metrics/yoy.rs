//! Year-over-year rent change per region.
//!
//! The percent change compares each row with the previous *row* of the same
//! region. When a year is missing from a region's series the change silently
//! spans the gap.

use std::collections::BTreeMap;

use crate::domain::{PanelDataset, YoyEntry};

pub fn compute_yoy(dataset: &PanelDataset) -> BTreeMap<String, Vec<YoyEntry>> {
    dataset
        .regions()
        .map(|(region, rows)| {
            let mut prior: Option<f64> = None;
            let entries = rows
                .iter()
                .map(|row| {
                    let percent_change = prior
                        .filter(|&p| p != 0.0)
                        .map(|p| (row.rent - p) / p * 100.0);
                    prior = Some(row.rent);
                    YoyEntry {
                        year: row.year,
                        value: row.rent,
                        percent_change,
                    }
                })
                .collect();
            (region.to_string(), entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PanelRow;

    fn panel(rows: &[(&str, i32, f64)]) -> PanelDataset {
        PanelDataset::new(
            rows.iter()
                .map(|&(r, y, rent)| PanelRow::new(r, y, rent, 50_000.0, 60.0, 40.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn one_entry_per_row_and_first_is_null() {
        let ds = panel(&[("A", 2020, 100.0), ("A", 2021, 110.0), ("A", 2022, 99.0), ("B", 2020, 5.0)]);
        let yoy = compute_yoy(&ds);

        let a = &yoy["A"];
        assert_eq!(a.len(), 3);
        assert_eq!(a[0].percent_change, None);
        assert!((a[1].percent_change.unwrap() - 10.0).abs() < 1e-12);
        assert!((a[2].percent_change.unwrap() + 10.0).abs() < 1e-12);

        assert_eq!(yoy["B"].len(), 1);
        assert_eq!(yoy["B"][0].percent_change, None);
    }

    #[test]
    fn gap_year_bridges_to_previous_present_row() {
        // 2021 is missing: 2022 is compared against 2020.
        let yoy = compute_yoy(&panel(&[("A", 2020, 100.0), ("A", 2022, 150.0)]));
        let a = &yoy["A"];
        assert_eq!(a[1].year, 2022);
        assert!((a[1].percent_change.unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn zero_prior_value_has_no_percent() {
        let yoy = compute_yoy(&panel(&[("A", 2020, 0.0), ("A", 2021, 10.0), ("A", 2022, 20.0)]));
        let a = &yoy["A"];
        assert_eq!(a[1].percent_change, None);
        assert!((a[2].percent_change.unwrap() - 100.0).abs() < 1e-12);
    }
}
