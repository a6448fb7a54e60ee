//! JSON export of solve results.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::solver::TransportResult;

/// Full result export structure
#[derive(Debug, Clone, Serialize)]
pub struct ResultExport {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    /// Scenario name the result came from
    pub scenario: String,
    /// The solve result
    pub result: TransportResult,
}

/// Export a solve result to JSON
///
/// Creates the exports directory if it doesn't exist.
/// Filename is auto-generated with timestamp: `transport_YYYYMMDD_HHMMSS.json`
///
/// Returns the path to the saved JSON file.
pub fn export_result_json(scenario: &str, result: &TransportResult) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now();
    let filename = format!("transport_{}.json", timestamp.format("%Y%m%d_%H%M%S"));
    let path = dir.join(&filename);

    let export = ResultExport {
        exported_at: timestamp.to_rfc3339(),
        version: "1.0.0",
        scenario: scenario.to_string(),
        result: result.clone(),
    };

    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, &export)?;

    log::info!("JSON result exported: {}", path.display());
    Ok(path)
}

/// Export a solve result to a specific file
pub fn export_result_json_to(
    scenario: &str,
    result: &TransportResult,
    path: &PathBuf,
) -> Result<()> {
    let export = ResultExport {
        exported_at: Local::now().to_rfc3339(),
        version: "1.0.0",
        scenario: scenario.to_string(),
        result: result.clone(),
    };

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;

    log::info!("JSON result exported: {}", path.display());
    Ok(())
}
