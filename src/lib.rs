//! `housing-insights` library crate.
//!
//! The binary (`insights`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - calculators, the regression and headline rules are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod headlines;
pub mod io;
pub mod math;
pub mod metrics;
pub mod regression;
pub mod report;
