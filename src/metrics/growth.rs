//! First-to-last-year growth per region.

use std::collections::BTreeMap;

use crate::domain::{GrowthRecord, PanelDataset, PanelField};

/// Growth of `field` from each region's first to last observed year.
///
/// A single-row region yields `start == end` and a zero absolute change.
pub fn compute_growth(dataset: &PanelDataset, field: PanelField) -> BTreeMap<String, GrowthRecord> {
    dataset
        .regions()
        .filter_map(|(region, rows)| {
            let (first, last) = (rows.first()?, rows.last()?);
            let start_value = field.value(first);
            let end_value = field.value(last);
            let absolute_change = end_value - start_value;
            let percent_change = (start_value != 0.0).then(|| absolute_change / start_value * 100.0);
            Some((
                region.to_string(),
                GrowthRecord {
                    start_year: first.year,
                    end_year: last.year,
                    start_value,
                    end_value,
                    absolute_change,
                    percent_change,
                },
            ))
        })
        .collect()
}
