//! Steady-state solver for the three-compartment transport model.
//!
//! Relaxes the intracellular compartment under fixed (or optionally finite)
//! external baths with an explicit Euler loop, then derives the
//! transepithelial picture from the final flux maps. A solve is a pure
//! function of its inputs: two runs with identical scenario, config and
//! initial state produce bit-identical results (fixed iteration order, no
//! hashing, no randomness, no clock reads in the numeric path).
//!
//! Non-convergence within the step budget is not an error. The best-effort
//! state comes back with `converged = false` and the flux maps re-evaluated
//! against it, so reported fluxes and concentrations stay consistent.
//!
//! References:
//! - Ussing HH, Zerahn K. Acta Physiol Scand. 1951;23:110-127
//! - Weinstein AM. Am J Physiol. 1986;250:F860-F873

pub mod aggregate;

pub use aggregate::{
    tep_indicator, transepithelial_fluxes, TepClassification, TransepithelialGating,
};

use serde::{Deserialize, Serialize};

use crate::transport::{
    active_flags, membrane_fluxes, ActivationRule, Concentrations, ParacellularSettings, Solute,
    SoluteMap, Transporter,
};

/// How the external baths respond to transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Infinite baths, never mutated (classical Ussing-chamber reading)
    #[default]
    Fixed,
    /// Finite baths depleted and enriched as solute crosses
    Finite {
        /// Bath turnover factor: reciprocal bath volume relative to the cell
        inverse_pool_size: f64,
    },
}

/// Solver tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Hard step budget per solve
    pub max_steps: usize,
    /// Converged when the largest per-step concentration change drops below
    /// this (mM)
    pub flux_threshold_mM: f64,
    /// Euler step (s); stable for catalog-scale Vmax values, halving it is
    /// the first knob to try if a custom scenario oscillates
    pub dt_sec: f64,
    /// External bath policy
    pub boundary: BoundaryPolicy,
    /// Transcellular K+/H+/HCO3- crediting policy
    pub te_gating: TransepithelialGating,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            flux_threshold_mM: 1e-6, // mM per step
            dt_sec: 0.1,             // s
            boundary: BoundaryPolicy::Fixed,
            te_gating: TransepithelialGating::SignOpposition,
        }
    }
}

impl SolverConfig {
    /// Validate parameters, returns human-readable warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.max_steps == 0 {
            warnings.push("max_steps is 0: the solver will return the initial state".to_string());
        }
        if self.flux_threshold_mM <= 0.0 {
            warnings.push(format!(
                "flux_threshold_mM must be positive, got {}",
                self.flux_threshold_mM
            ));
        }
        if self.dt_sec <= 0.0 {
            warnings.push(format!("dt_sec must be positive, got {}", self.dt_sec));
        }
        if let BoundaryPolicy::Finite { inverse_pool_size } = self.boundary {
            if inverse_pool_size < 0.0 {
                warnings.push(format!(
                    "inverse_pool_size must be non-negative, got {}",
                    inverse_pool_size
                ));
            }
        }
        warnings
    }
}

/// One solvable configuration of the epithelial barrier
///
/// The intracellular state is deliberately not part of the scenario; it is
/// an explicit argument of [`solve`], so the caller owns any persistence
/// between runs.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Transporter instances with their placements
    pub transporters: Vec<Transporter>,
    /// Apical (luminal) bath
    pub apical_ecf: Concentrations,
    /// Basolateral (blood-side) bath
    pub basolateral_ecf: Concentrations,
    /// Tight-junction leak configuration
    pub paracellular: ParacellularSettings,
    /// Activation rule table evaluated before kinetics
    pub rules: Vec<ActivationRule>,
}

impl Scenario {
    /// Structural validation over all components, returns warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for transporter in &self.transporters {
            for warning in transporter.validate() {
                warnings.push(format!("{}: {}", transporter.id, warning));
            }
        }
        warnings.extend(self.paracellular.validate());
        warnings
    }
}

/// Everything one solve produces
///
/// Plain owned data, created fresh per solve and immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResult {
    /// Final apical bath (differs from the scenario's only under finite pools)
    pub apical_ecf: Concentrations,
    /// Final intracellular concentrations
    pub icf: Concentrations,
    /// Final basolateral bath
    pub basolateral_ecf: Concentrations,
    /// Apical membrane flux at the final state (positive into the cell)
    pub apical_flux_mM_per_sec: SoluteMap,
    /// Basolateral membrane flux at the final state (positive into the cell)
    pub basolateral_flux_mM_per_sec: SoluteMap,
    /// Tight-junction leak (positive apical to basolateral)
    pub paracellular_flux_mM_per_sec: SoluteMap,
    /// Per-solute sum of both membrane fluxes and the leak
    pub net_flux_mM_per_sec: SoluteMap,
    /// Transepithelial flux per solute in [`Solute::ALL`] order, water last
    /// (positive = absorption)
    pub transepithelial_flux_mM_per_sec: Vec<(Solute, f64)>,
    /// Net-charge indicator over the transepithelial fluxes
    pub tep: f64,
    /// Qualitative reading of the indicator
    pub tep_classification: TepClassification,
    /// False when the step budget ran out first
    pub converged: bool,
    /// Euler steps executed
    pub steps: usize,
}

impl TransportResult {
    /// Transepithelial flux for one solute (0 if absent)
    pub fn transepithelial_flux_for(&self, solute: Solute) -> f64 {
        self.transepithelial_flux_mM_per_sec
            .iter()
            .find(|(s, _)| *s == solute)
            .map(|(_, flux)| *flux)
            .unwrap_or(0.0)
    }

    /// Sum of the non-water transepithelial fluxes (the water heuristic's
    /// driving term)
    pub fn net_te_solute_sum(&self) -> f64 {
        self.transepithelial_flux_mM_per_sec
            .iter()
            .filter(|(solute, _)| *solute != Solute::Water)
            .map(|(_, flux)| flux)
            .sum()
    }

    /// Print a formatted summary to stdout
    pub fn print_summary(&self) {
        let status = if self.converged {
            "converged"
        } else {
            "step budget exhausted"
        };
        println!(
            "=== Transport Steady State ({} after {} steps) ===",
            status, self.steps
        );
        println!();
        println!("Intracellular (mM):");
        for (solute, value) in self.icf.as_map().iter() {
            println!("  {:<10} {:>14.6}", solute.symbol(), value);
        }
        println!("  {:<10} {:>14.2}  (from mM-scale H+)", "pH", self.icf.ph());
        println!();
        println!("Membrane fluxes (mM/s, positive into the cell):");
        println!(
            "  {:<10} {:>12} {:>12} {:>12}",
            "Solute", "Apical", "Basolateral", "Paracell."
        );
        for solute in Solute::ALL {
            println!(
                "  {:<10} {:>12.6} {:>12.6} {:>12.6}",
                solute.symbol(),
                self.apical_flux_mM_per_sec.get(solute),
                self.basolateral_flux_mM_per_sec.get(solute),
                self.paracellular_flux_mM_per_sec.get(solute),
            );
        }
        println!();
        println!("Transepithelial flux (mM/s, positive = absorption):");
        for (solute, flux) in &self.transepithelial_flux_mM_per_sec {
            println!("  {:<10} {:>12.6}", solute.symbol(), flux);
        }
        println!("  Net solute sum: {:.6}", self.net_te_solute_sum());
        println!();
        println!(
            "TEP indicator: {:+.3}  ({})",
            self.tep,
            self.tep_classification.label()
        );
    }
}

/// Relax the intracellular compartment toward steady state
///
/// `initial_icf` is the caller-owned starting state; the result carries the
/// final state for callers that persist it across solves. Boundary values
/// may come from user edits, so all three compartments are coerced to their
/// floors before the first step.
pub fn solve(
    scenario: &Scenario,
    config: &SolverConfig,
    initial_icf: &Concentrations,
) -> TransportResult {
    let mut apical_ecf = scenario.apical_ecf;
    let mut basolateral_ecf = scenario.basolateral_ecf;
    let mut icf = *initial_icf;
    apical_ecf.clamp_floors();
    basolateral_ecf.clamp_floors();
    icf.clamp_floors();

    // The rule table reads placements only, and placements are frozen for
    // the whole solve, so one evaluation covers every step.
    let active = active_flags(&scenario.transporters, &scenario.rules);

    let mut apical_flux = SoluteMap::zero();
    let mut basolateral_flux = SoluteMap::zero();
    let mut paracellular_flux = SoluteMap::zero();
    let mut converged = false;
    let mut steps = 0;

    for step in 0..config.max_steps {
        let (a_flux, b_flux) = membrane_fluxes(
            &scenario.transporters,
            &active,
            &apical_ecf,
            &icf,
            &basolateral_ecf,
        );
        let leak = scenario
            .paracellular
            .compute_leak(&apical_ecf, &basolateral_ecf);

        // Euler update; the convergence metric is taken before the floors
        // bite so a clamped step still counts its full attempted change.
        let mut max_abs_change_mM = 0.0_f64;
        for solute in Solute::ALL {
            let net = a_flux.get(solute) + b_flux.get(solute) + leak.get(solute);
            let delta_mM = net * config.dt_sec;
            icf.apply_delta(solute, delta_mM);
            max_abs_change_mM = max_abs_change_mM.max(delta_mM.abs());
        }
        icf.clamp_floors();

        if let BoundaryPolicy::Finite { inverse_pool_size } = config.boundary {
            // Each membrane drains its adjacent bath; the junction leak
            // moves solute straight from the apical to the basolateral bath.
            for solute in Solute::ALL {
                let scale = config.dt_sec * inverse_pool_size;
                apical_ecf.apply_delta(solute, -(a_flux.get(solute) + leak.get(solute)) * scale);
                basolateral_ecf.apply_delta(solute, (leak.get(solute) - b_flux.get(solute)) * scale);
            }
            apical_ecf.clamp_floors();
            basolateral_ecf.clamp_floors();
        }

        apical_flux = a_flux;
        basolateral_flux = b_flux;
        paracellular_flux = leak;
        steps = step + 1;

        if max_abs_change_mM < config.flux_threshold_mM {
            converged = true;
            break;
        }
    }

    if converged {
        log::debug!("steady state after {} steps", steps);
    } else {
        // Best effort: re-evaluate the fluxes at the final state so the
        // reported maps match the reported concentrations.
        let (a_flux, b_flux) = membrane_fluxes(
            &scenario.transporters,
            &active,
            &apical_ecf,
            &icf,
            &basolateral_ecf,
        );
        apical_flux = a_flux;
        basolateral_flux = b_flux;
        paracellular_flux = scenario
            .paracellular
            .compute_leak(&apical_ecf, &basolateral_ecf);
        log::debug!("step budget of {} exhausted without convergence", steps);
    }

    let transepithelial_flux_mM_per_sec = transepithelial_fluxes(
        &scenario.transporters,
        &active,
        config.te_gating,
        &scenario.paracellular,
        &mut apical_flux,
        &mut basolateral_flux,
        &paracellular_flux,
    );
    let tep = tep_indicator(&transepithelial_flux_mM_per_sec);
    let tep_classification = TepClassification::classify(tep);

    let mut net_flux = SoluteMap::zero();
    for solute in Solute::ALL {
        net_flux.set(
            solute,
            apical_flux.get(solute) + basolateral_flux.get(solute) + paracellular_flux.get(solute),
        );
    }

    TransportResult {
        apical_ecf,
        icf,
        basolateral_ecf,
        apical_flux_mM_per_sec: apical_flux,
        basolateral_flux_mM_per_sec: basolateral_flux,
        paracellular_flux_mM_per_sec: paracellular_flux,
        net_flux_mM_per_sec: net_flux,
        transepithelial_flux_mM_per_sec,
        tep,
        tep_classification,
        converged,
        steps,
    }
}
