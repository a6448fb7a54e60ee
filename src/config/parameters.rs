//! Run parameters loadable from JSON.
//!
//! Everything a run needs besides the scenario wiring itself: solver
//! tuning, tight-junction settings, the SGLT isoform and the scenario
//! name. Missing or malformed files fall back to defaults so the demo
//! binary always starts.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::presets::SgltIsoform;
use crate::solver::SolverConfig;
use crate::transport::ParacellularSettings;

/// Top-level parameter container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Steady-state solver tuning
    pub solver: SolverConfig,
    /// Tight-junction leak configuration
    pub paracellular: ParacellularSettings,
    /// Na+:glucose coupling used by the SGLT preset
    pub sglt_isoform: SgltIsoform,
    /// Scenario the binary builds: "baseline", "glucose" or "chloride"
    pub scenario: String,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            paracellular: ParacellularSettings::default(),
            sglt_isoform: SgltIsoform::default(),
            scenario: "baseline".to_string(),
        }
    }
}

impl SimulationParameters {
    /// Load from a JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Parameter file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Write the parameters as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Saved parameters to {:?}", path.as_ref());
        Ok(())
    }

    /// Warnings across all parameter groups
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.solver.validate();
        warnings.extend(self.paracellular.validate());
        warnings
    }
}
