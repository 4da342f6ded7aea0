//! Metric calculators over the panel.
//!
//! Each calculator is a pure function of `&PanelDataset` returning a freshly
//! built map keyed in dataset order (region name or year), so results can be
//! computed in any order or in parallel.

pub mod correlation;
pub mod disparity;
pub mod growth;
pub mod yoy;

pub use correlation::*;
pub use disparity::*;
pub use growth::*;
pub use yoy::*;
