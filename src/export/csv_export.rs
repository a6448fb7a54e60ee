//! CSV flux-table export for solve results.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::solver::TransportResult;
use crate::transport::Solute;

/// One CSV row per solute
#[derive(Debug, Clone, Serialize)]
pub struct SoluteFluxRecord {
    /// Solute symbol
    pub solute: String,
    /// Apical membrane flux (mM/s, positive into the cell)
    pub apical_flux_mM_per_sec: f64,
    /// Basolateral membrane flux (mM/s, positive into the cell)
    pub basolateral_flux_mM_per_sec: f64,
    /// Tight-junction leak (mM/s, positive apical to basolateral)
    pub paracellular_flux_mM_per_sec: f64,
    /// Net flux into the cell plus leak (mM/s)
    pub net_flux_mM_per_sec: f64,
    /// Transepithelial flux (mM/s, positive = absorption)
    pub transepithelial_flux_mM_per_sec: f64,
    /// Final intracellular concentration (mM)
    pub icf_mM: f64,
    /// Final apical bath concentration (mM)
    pub apical_ecf_mM: f64,
    /// Final basolateral bath concentration (mM)
    pub basolateral_ecf_mM: f64,
}

/// Build the per-solute rows in [`Solute::ALL`] order
pub fn flux_records(result: &TransportResult) -> Vec<SoluteFluxRecord> {
    Solute::ALL
        .iter()
        .map(|&solute| SoluteFluxRecord {
            solute: solute.symbol().to_string(),
            apical_flux_mM_per_sec: result.apical_flux_mM_per_sec.get(solute),
            basolateral_flux_mM_per_sec: result.basolateral_flux_mM_per_sec.get(solute),
            paracellular_flux_mM_per_sec: result.paracellular_flux_mM_per_sec.get(solute),
            net_flux_mM_per_sec: result.net_flux_mM_per_sec.get(solute),
            transepithelial_flux_mM_per_sec: result.transepithelial_flux_for(solute),
            icf_mM: result.icf.get(solute),
            apical_ecf_mM: result.apical_ecf.get(solute),
            basolateral_ecf_mM: result.basolateral_ecf.get(solute),
        })
        .collect()
}

/// Export the flux table to CSV
///
/// Creates the exports directory if it doesn't exist.
/// Filename is auto-generated with timestamp: `fluxes_YYYYMMDD_HHMMSS.csv`
///
/// Returns the path to the saved CSV file.
pub fn export_fluxes_csv(result: &TransportResult) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("fluxes_{}.csv", timestamp);
    let path = dir.join(&filename);

    let file = File::create(&path)?;
    write_records(file, result)?;

    log::info!("CSV flux table exported: {}", path.display());
    Ok(path)
}

/// Export the flux table to a specific file
pub fn export_fluxes_csv_to(result: &TransportResult, path: &PathBuf) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, result)?;

    log::info!("CSV flux table exported: {}", path.display());
    Ok(())
}

fn write_records(file: File, result: &TransportResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(file);
    for record in flux_records(result) {
        writer.serialize(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::solver::{solve, SolverConfig};

    #[test]
    fn test_one_record_per_solute() {
        let scenario = presets::chloride_secretion_scenario();
        let result = solve(&scenario, &SolverConfig::default(), &presets::baseline_icf());
        let records = flux_records(&result);

        assert_eq!(records.len(), Solute::COUNT);
        assert_eq!(records[0].solute, "Na+");
        assert_eq!(records.last().unwrap().solute, "H2O");

        let chloride = &records[Solute::Chloride.index()];
        assert_eq!(
            chloride.transepithelial_flux_mM_per_sec,
            result.transepithelial_flux_for(Solute::Chloride)
        );
        assert_eq!(chloride.icf_mM, result.icf.get(Solute::Chloride));
    }
}
