//! Transport module for the epithelial barrier simulation.
//!
//! This module defines the solute species moved across the barrier, the
//! per-compartment concentration state, and the transporter machinery:
//! - Solute catalog with fixed valences (Na+, K+, Cl-, HCO3-, Ca2+, H+,
//!   glucose, amino acid, water)
//! - Transporter definitions (channels, cotransporters, exchangers, pumps)
//! - Kinetic rate laws (Michaelis-Menten saturation, gradient-driven flux)
//! - Paracellular leak pathway between the external compartments
//! - Activation rules coupling transporters to their physiological partners
//!
//! The three compartments are the apical external fluid (lumen side), the
//! intracellular fluid, and the basolateral external fluid (blood side).
//!
//! References:
//! - Boron WF, Boulpaep EL. Medical Physiology. 3rd ed. Elsevier, 2016 (Ch. 5, epithelial transport)
//! - Hediger MA et al. Pflugers Arch. 2004;447:465-468 (SLC transporter series)
//! - Ussing HH, Zerahn K. Acta Physiol Scand. 1951;23:110-127 (transepithelial flux)

pub mod activation;
pub mod kinetics;
pub mod paracellular;
pub mod transporter;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use activation::{active_flags, default_rules, ActivationRule, RequirementScope, TransporterPattern};
pub use kinetics::{membrane_fluxes, transport_rate, GradientSense, KineticLaw};
pub use paracellular::{ParacellularMode, ParacellularSettings};
pub use transporter::{Kinetics, PhModulation, Placement, Stoichiometry, Transporter, TransporterClass};

/// Floor for intracellular H+ concentration (mM)
///
/// Prevents log-scale pH calculations from diverging when proton export
/// outruns the timestep.
pub const PROTON_FLOOR_MM: f64 = 1e-8;

/// Solute species moved across the epithelial barrier
///
/// The set is closed: the engine iterates `Solute::ALL` in declaration order
/// everywhere, so two runs with identical inputs visit solutes identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Solute {
    /// Sodium ion
    #[serde(rename = "Na+")]
    Sodium,
    /// Potassium ion
    #[serde(rename = "K+")]
    Potassium,
    /// Chloride ion
    #[serde(rename = "Cl-")]
    Chloride,
    /// Bicarbonate ion
    #[serde(rename = "HCO3-")]
    Bicarbonate,
    /// Calcium ion
    #[serde(rename = "Ca2+")]
    Calcium,
    /// Proton (free H+, not buffered)
    #[serde(rename = "H+")]
    Proton,
    /// Glucose (uncharged)
    Glucose,
    /// Generic neutral amino acid
    AminoAcid,
    /// Water
    #[serde(rename = "H2O")]
    Water,
}

impl Solute {
    /// Number of solute species
    pub const COUNT: usize = 9;

    /// All solutes in canonical iteration order
    pub const ALL: [Solute; Solute::COUNT] = [
        Solute::Sodium,
        Solute::Potassium,
        Solute::Chloride,
        Solute::Bicarbonate,
        Solute::Calcium,
        Solute::Proton,
        Solute::Glucose,
        Solute::AminoAcid,
        Solute::Water,
    ];

    /// Dense index into per-solute arrays
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display symbol (matches the serialized form)
    pub fn symbol(self) -> &'static str {
        match self {
            Solute::Sodium => "Na+",
            Solute::Potassium => "K+",
            Solute::Chloride => "Cl-",
            Solute::Bicarbonate => "HCO3-",
            Solute::Calcium => "Ca2+",
            Solute::Proton => "H+",
            Solute::Glucose => "Glucose",
            Solute::AminoAcid => "AminoAcid",
            Solute::Water => "H2O",
        }
    }

    /// Ionic valence used for the transepithelial potential indicator
    ///
    /// Reference: standard ionic charges; uncharged solutes contribute zero.
    pub fn valence(self) -> f64 {
        match self {
            Solute::Sodium | Solute::Potassium | Solute::Proton => 1.0,
            Solute::Chloride | Solute::Bicarbonate => -1.0,
            Solute::Calcium => 2.0,
            Solute::Glucose | Solute::AminoAcid | Solute::Water => 0.0,
        }
    }

    /// Whether the solute carries charge
    #[inline]
    pub fn is_ion(self) -> bool {
        self.valence() != 0.0
    }
}

/// Dense per-solute value map
///
/// Backed by a fixed array indexed by `Solute::index`, so iteration order is
/// the declaration order of `Solute` and arithmetic is fully deterministic.
/// Serializes as a symbol-to-value JSON map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Solute, f64>", into = "BTreeMap<Solute, f64>")]
pub struct SoluteMap {
    values: [f64; Solute::COUNT],
}

impl SoluteMap {
    /// Create a map with all values zero
    pub fn zero() -> Self {
        Self {
            values: [0.0; Solute::COUNT],
        }
    }

    /// Get the value for a solute
    #[inline]
    pub fn get(&self, solute: Solute) -> f64 {
        self.values[solute.index()]
    }

    /// Set the value for a solute
    #[inline]
    pub fn set(&mut self, solute: Solute, value: f64) {
        self.values[solute.index()] = value;
    }

    /// Add to the value for a solute
    #[inline]
    pub fn add(&mut self, solute: Solute, delta: f64) {
        self.values[solute.index()] += delta;
    }

    /// Iterate (solute, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Solute, f64)> + '_ {
        Solute::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Largest absolute value across all solutes
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
    }

    /// True if every value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

impl Default for SoluteMap {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BTreeMap<Solute, f64>> for SoluteMap {
    fn from(map: BTreeMap<Solute, f64>) -> Self {
        let mut out = Self::zero();
        for (solute, value) in map {
            out.set(solute, value);
        }
        out
    }
}

impl From<SoluteMap> for BTreeMap<Solute, f64> {
    fn from(map: SoluteMap) -> Self {
        Solute::ALL.iter().map(|&s| (s, map.get(s))).collect()
    }
}

/// Which fluid a substrate is read from during rate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompartmentSide {
    /// The external compartment facing the transporter's membrane
    External,
    /// The intracellular compartment
    Intracellular,
}

/// Solute concentrations for one compartment (mM)
///
/// Invariants: every concentration is non-negative, and H+ never drops below
/// [`PROTON_FLOOR_MM`]. `set` clamps on entry; the solver applies raw Euler
/// deltas and restores the invariants with `clamp_floors` once per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concentrations {
    values: SoluteMap,
}

impl Concentrations {
    /// Create an all-zero compartment (H+ at the floor)
    pub fn new() -> Self {
        let mut c = Self {
            values: SoluteMap::zero(),
        };
        c.values.set(Solute::Proton, PROTON_FLOOR_MM);
        c
    }

    /// Get the concentration of a solute (mM)
    #[inline]
    pub fn get(&self, solute: Solute) -> f64 {
        self.values.get(solute)
    }

    /// Set the concentration of a solute (mM), clamped to the invariants
    pub fn set(&mut self, solute: Solute, value_mM: f64) {
        let clamped = if solute == Solute::Proton {
            value_mM.max(PROTON_FLOOR_MM)
        } else {
            value_mM.max(0.0)
        };
        self.values.set(solute, clamped);
    }

    /// Apply a raw concentration delta without clamping
    ///
    /// Used by the integrator, which measures the pre-clamp change before
    /// calling [`Concentrations::clamp_floors`].
    #[inline]
    pub fn apply_delta(&mut self, solute: Solute, delta_mM: f64) {
        self.values.add(solute, delta_mM);
    }

    /// Restore the invariants: H+ >= floor, everything >= 0
    pub fn clamp_floors(&mut self) {
        let h = self.values.get(Solute::Proton);
        self.values.set(Solute::Proton, h.max(PROTON_FLOOR_MM));
        for solute in Solute::ALL {
            let v = self.values.get(solute);
            if v < 0.0 {
                self.values.set(solute, 0.0);
            }
        }
    }

    /// pH computed from the stored H+ concentration
    ///
    /// Taken directly as -log10 of the stored value; no molar rescaling is
    /// applied, so the result lives on the same scale as the concentration
    /// units.
    pub fn ph(&self) -> f64 {
        -self.get(Solute::Proton).max(PROTON_FLOOR_MM).log10()
    }

    /// Access the underlying map
    pub fn as_map(&self) -> &SoluteMap {
        &self.values
    }
}

impl Default for Concentrations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solute_order_and_count() {
        assert_eq!(Solute::ALL.len(), Solute::COUNT);
        for (i, solute) in Solute::ALL.iter().enumerate() {
            assert_eq!(solute.index(), i, "index must match canonical order");
        }
    }

    #[test]
    fn test_valences() {
        assert_eq!(Solute::Sodium.valence(), 1.0);
        assert_eq!(Solute::Potassium.valence(), 1.0);
        assert_eq!(Solute::Proton.valence(), 1.0);
        assert_eq!(Solute::Chloride.valence(), -1.0);
        assert_eq!(Solute::Bicarbonate.valence(), -1.0);
        assert_eq!(Solute::Calcium.valence(), 2.0);
        assert_eq!(Solute::Glucose.valence(), 0.0);
        assert_eq!(Solute::AminoAcid.valence(), 0.0);
        assert_eq!(Solute::Water.valence(), 0.0);
    }

    #[test]
    fn test_solute_map_basic() {
        let mut map = SoluteMap::zero();
        assert!(map.is_zero());

        map.set(Solute::Sodium, 145.0);
        map.add(Solute::Sodium, 5.0);
        assert_eq!(map.get(Solute::Sodium), 150.0);
        assert_eq!(map.get(Solute::Potassium), 0.0);
        assert!(!map.is_zero());
        assert_eq!(map.max_abs(), 150.0);
    }

    #[test]
    fn test_solute_map_serializes_by_symbol() {
        let mut map = SoluteMap::zero();
        map.set(Solute::Sodium, 145.0);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"Na+\""), "expected symbol key, got {}", json);

        let parsed: SoluteMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(Solute::Sodium), 145.0);
    }

    #[test]
    fn test_concentrations_clamp_on_set() {
        let mut c = Concentrations::new();
        c.set(Solute::Chloride, -5.0);
        assert_eq!(c.get(Solute::Chloride), 0.0);

        c.set(Solute::Proton, 0.0);
        assert_eq!(c.get(Solute::Proton), PROTON_FLOOR_MM);
    }

    #[test]
    fn test_clamp_floors_after_raw_delta() {
        let mut c = Concentrations::new();
        c.set(Solute::Glucose, 1.0);
        c.set(Solute::Proton, 2e-5);

        c.apply_delta(Solute::Glucose, -3.0);
        c.apply_delta(Solute::Proton, -1.0);
        assert_eq!(c.get(Solute::Glucose), -2.0, "raw delta is unclamped");

        c.clamp_floors();
        assert_eq!(c.get(Solute::Glucose), 0.0);
        assert_eq!(c.get(Solute::Proton), PROTON_FLOOR_MM);
    }

    #[test]
    fn test_ph_from_stored_concentration() {
        let mut c = Concentrations::new();
        c.set(Solute::Proton, 1e-4);
        assert!((c.ph() - 4.0).abs() < 1e-12);

        c.set(Solute::Proton, 2e-5);
        assert!((c.ph() - 4.69897).abs() < 1e-4);
    }
}
