//! Export functionality for solve results.
//!
//! Provides JSON result snapshots and CSV flux tables.

mod csv_export;
mod json_export;

pub use csv_export::{export_fluxes_csv, export_fluxes_csv_to, flux_records, SoluteFluxRecord};
pub use json_export::{export_result_json, export_result_json_to, ResultExport};
