//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - JSON artifact writers (`export`)
//! - Markdown OLS appendix (`appendix`)

pub mod appendix;
pub mod export;
pub mod ingest;

pub use appendix::*;
pub use export::*;
pub use ingest::*;
