//! Transporter definitions for the epithelial barrier.
//!
//! A transporter couples a signed stoichiometry (which solutes move, in which
//! direction, per transport cycle) to a kinetic rate law and a membrane
//! placement. The stoichiometric sign convention follows the intracellular
//! compartment: positive coefficients move solute into the cell, negative
//! coefficients move it out.
//!
//! References:
//! - Hediger MA et al. Pflugers Arch. 2004;447:465-468 (SLC transporter families)
//! - Skou JC. Biochim Biophys Acta. 1957;23:394-401 (Na+/K+-ATPase)
//! - Wright EM, Loo DD, Hirayama BA. Physiol Rev. 2011;91:733-794 (SGLT stoichiometry)

use serde::{Deserialize, Serialize};

use super::kinetics::KineticLaw;
use super::{Solute, SoluteMap};

/// Mechanistic class of a transporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransporterClass {
    /// Passive pore, flux follows the electrochemical-free gradient
    Channel,
    /// Cotransporter moving all substrates in the same direction
    Symporter,
    /// Countertransporter moving substrates in opposite directions
    Antiporter,
    /// Anion exchanger (antiporter subfamily kept distinct for display)
    Exchanger,
    /// Primary active transporter hydrolyzing ATP
    Pump,
}

/// Membrane placement of a transporter instance
///
/// `Both` is only meaningful for pure water channels, which participate in
/// the water-follows-solute pathway rather than in solute kinetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Not inserted into either membrane
    #[default]
    None,
    /// Apical (lumen-facing) membrane
    Apical,
    /// Basolateral (blood-facing) membrane
    Basolateral,
    /// Both membranes (pure water channels only)
    Both,
}

/// Signed stoichiometry of one transport cycle
///
/// Entries are kept in insertion order; the engine never reorders them, so
/// rate evaluation and flux distribution are deterministic. Coefficients are
/// relative to the intracellular compartment: +2 imports two per cycle, -1
/// exports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stoichiometry {
    entries: Vec<(Solute, i32)>,
}

impl Stoichiometry {
    /// Create from (solute, coefficient) pairs
    pub fn new(entries: Vec<(Solute, i32)>) -> Self {
        Self { entries }
    }

    /// The (solute, coefficient) pairs in definition order
    pub fn entries(&self) -> &[(Solute, i32)] {
        &self.entries
    }

    /// Coefficient for a solute (0 if absent)
    pub fn coeff(&self, solute: Solute) -> i32 {
        self.entries
            .iter()
            .find(|(s, _)| *s == solute)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// First solute named in the definition
    pub fn first_solute(&self) -> Option<Solute> {
        self.entries.first().map(|(s, _)| *s)
    }

    /// Whether the solute appears with any nonzero coefficient
    pub fn carries(&self, solute: Solute) -> bool {
        self.coeff(solute) != 0
    }

    /// Whether the solute is moved into the cell (positive coefficient)
    pub fn imports(&self, solute: Solute) -> bool {
        self.coeff(solute) > 0
    }

    /// Whether the solute is moved out of the cell (negative coefficient)
    pub fn exports(&self, solute: Solute) -> bool {
        self.coeff(solute) < 0
    }

    /// True if the stoichiometry moves only water
    pub fn is_water_only(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|(s, c)| *s == Solute::Water || *c == 0)
    }

    /// Distribute a cycle rate into a flux accumulator (mM/s per solute)
    ///
    /// Water coefficients are skipped: bulk water movement is derived from
    /// the aggregated solute flux, not from per-cycle stoichiometry.
    pub fn distribute(&self, rate_mM_per_sec: f64, fluxes: &mut SoluteMap) {
        for &(solute, coeff) in &self.entries {
            if solute == Solute::Water {
                continue;
            }
            fluxes.add(solute, rate_mM_per_sec * f64::from(coeff));
        }
    }
}

/// Saturation kinetics parameters shared by all rate laws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinetics {
    /// Maximum cycle rate at saturation (mM/s)
    pub vmax_mM_per_sec: f64,
    /// Half-saturation constant (mM)
    pub km_mM: f64,
}

impl Kinetics {
    /// Create kinetics parameters
    pub fn new(vmax_mM_per_sec: f64, km_mM: f64) -> Self {
        Self {
            vmax_mM_per_sec,
            km_mM,
        }
    }
}

/// Sigmoid pH gate multiplying a transporter's base rate
///
/// gate = 1 / (1 + exp((pH - pH50) / sigma))
///
/// Activity rises as the cell acidifies, the behavior of acid-activated
/// exchangers. pH is computed from the stored intracellular H+ value (see
/// [`super::Concentrations::ph`]), so `ph50` must be chosen on that scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhModulation {
    /// pH of half-maximal activity
    pub ph50: f64,
    /// Steepness of the sigmoid (pH units per e-fold)
    pub sigma: f64,
}

/// One transporter instance on the epithelial barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transporter {
    /// Stable short identifier (e.g. "NKCC")
    pub id: String,
    /// Display name
    pub name: String,
    /// Mechanistic class
    pub class: TransporterClass,
    /// Signed per-cycle stoichiometry
    pub stoichiometry: Stoichiometry,
    /// Saturation parameters
    pub kinetics: Kinetics,
    /// Membrane placement (None keeps the transporter inert)
    pub placement: Placement,
    /// Expression density scaling the rate (1.0 = nominal)
    pub density: f64,
    /// Rate law dispatched during flux evaluation
    pub law: KineticLaw,
    /// Optional intracellular pH gate
    pub ph_modulation: Option<PhModulation>,
}

impl Transporter {
    /// Create a transporter with nominal density, no placement, and the
    /// default rate law for its stoichiometry
    pub fn new(
        id: &str,
        name: &str,
        class: TransporterClass,
        stoichiometry: Stoichiometry,
        kinetics: Kinetics,
    ) -> Self {
        let law = KineticLaw::default_for(&stoichiometry);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class,
            stoichiometry,
            kinetics,
            placement: Placement::None,
            density: 1.0,
            law,
            ph_modulation: None,
        }
    }

    /// Replace the rate law
    pub fn with_law(mut self, law: KineticLaw) -> Self {
        self.law = law;
        self
    }

    /// Set the membrane placement
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the expression density
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Attach a pH gate
    pub fn with_ph_modulation(mut self, modulation: PhModulation) -> Self {
        self.ph_modulation = Some(modulation);
        self
    }

    /// True if the transporter moves only water
    pub fn is_water_channel(&self) -> bool {
        self.stoichiometry.is_water_only()
    }

    /// Structural validation, returns human-readable warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.kinetics.vmax_mM_per_sec < 0.0 {
            warnings.push(format!(
                "Vmax is negative: {:.3} mM/s",
                self.kinetics.vmax_mM_per_sec
            ));
        }
        if self.kinetics.km_mM <= 0.0 {
            warnings.push(format!("Km must be positive: {:.3} mM", self.kinetics.km_mM));
        }
        if !self.kinetics.vmax_mM_per_sec.is_finite() || !self.kinetics.km_mM.is_finite() {
            warnings.push("kinetics parameters must be finite".to_string());
        }
        if self.stoichiometry.entries().is_empty() {
            warnings.push("stoichiometry names no solutes".to_string());
        }
        if self.density < 0.0 {
            warnings.push(format!("density is negative: {:.3}", self.density));
        }
        if self.placement == Placement::Both && !self.is_water_channel() {
            warnings.push("placement 'both' is only valid for pure water channels".to_string());
        }
        if let Some(modulation) = &self.ph_modulation {
            if modulation.sigma <= 0.0 {
                warnings.push(format!(
                    "pH modulation sigma must be positive: {:.3}",
                    modulation.sigma
                ));
            }
        }

        warnings
    }
}
