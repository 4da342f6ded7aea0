//! Reporting utilities: latest-year ranking, visualization payload, and
//! formatted terminal output.

pub mod format;
pub mod payload;

pub use format::*;
pub use payload::*;

use crate::domain::{PanelDataset, PanelRow};

/// Rows of the latest year, highest rent first.
///
/// The sort is stable, so equal rents keep region order.
pub fn latest_ranking(dataset: &PanelDataset) -> Vec<PanelRow> {
    let mut rows: Vec<PanelRow> = dataset.rows_in_year(dataset.latest_year()).cloned().collect();
    rows.sort_by(|a, b| b.rent.partial_cmp(&a.rent).unwrap_or(std::cmp::Ordering::Equal));
    rows
}
