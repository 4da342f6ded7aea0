//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated input table (`PanelRow`, `PanelDataset`)
//! - metric records (`GrowthRecord`, `YoyEntry`, `DisparityRecord`, `Correlations`)
//! - regression outputs (`RegressionSnapshot`, `TermValues`, `CovariateValues`)
//! - narrative and run configuration types (`Headline`, `PipelineConfig`)

pub mod panel;
pub mod types;

pub use panel::*;
pub use types::*;
