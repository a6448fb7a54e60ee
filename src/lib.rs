//! Epithelial Flux - three-compartment epithelial solute transport engine
//!
//! This library integrates transporter kinetics, tight-junction leaks and
//! steady-state relaxation to model directed solute and water movement
//! across a single-cell epithelial barrier.

// Allow non-snake-case for unit suffixes in field names (mM, mM_per_sec, etc.)
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod config;
pub mod export;
pub mod presets;
pub mod solver;
pub mod transport;

pub use config::SimulationParameters;
pub use presets::SgltIsoform;
pub use solver::{
    solve, BoundaryPolicy, Scenario, SolverConfig, TepClassification, TransepithelialGating,
    TransportResult,
};
pub use transport::{
    Concentrations, Kinetics, KineticLaw, ParacellularMode, ParacellularSettings, Placement,
    Solute, SoluteMap, Stoichiometry, Transporter, TransporterClass,
};
