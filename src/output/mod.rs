// src/output/mod.rs

//! What the driver does with forwarded units: write them, then report.

pub mod summary;
pub mod writer;

pub use summary::{write_report, RunSummary};
pub use writer::write_unit;
