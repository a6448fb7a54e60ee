//! Paracellular leak pathway between the external compartments.
//!
//! Tight-junction leak flux bypasses the cell entirely: it moves solute
//! directly between the apical and basolateral fluids, driven linearly by
//! their concentration difference. Junctions are charge-selective, so the
//! pathway is configured as cation-selective (Na+, K+, and water follow the
//! leaky-epithelium claudin pores) or anion-selective (Cl-, HCO3-).
//!
//! References:
//! - Anderson JM, Van Itallie CM. Cold Spring Harb Perspect Biol. 2009;1:a002584
//! - Gunzel D, Yu AS. Physiol Rev. 2013;93:525-569 (claudin charge selectivity)

use serde::{Deserialize, Serialize};

use super::{Concentrations, Solute, SoluteMap};

/// Solutes carried by a cation-selective junction
pub const CATION_LEAK_SOLUTES: [Solute; 3] = [Solute::Sodium, Solute::Potassium, Solute::Water];

/// Solutes carried by an anion-selective junction
pub const ANION_LEAK_SOLUTES: [Solute; 2] = [Solute::Chloride, Solute::Bicarbonate];

/// Charge selectivity of the tight junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParacellularMode {
    /// Tight epithelium, no paracellular flux
    #[default]
    None,
    /// Cation-selective pores (Na+, K+, water)
    Cation,
    /// Anion-selective pores (Cl-, HCO3-)
    Anion,
}

/// Paracellular pathway configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParacellularSettings {
    /// Junction selectivity
    pub mode: ParacellularMode,
    /// Permeability for cation-selective flux (per second)
    pub cation_permeability_per_sec: f64,
    /// Permeability for anion-selective flux (per second)
    pub anion_permeability_per_sec: f64,
}

impl Default for ParacellularSettings {
    fn default() -> Self {
        Self {
            mode: ParacellularMode::None,
            cation_permeability_per_sec: 1.0,
            anion_permeability_per_sec: 1.0,
        }
    }
}

impl ParacellularSettings {
    /// Shorthand for a cation-selective junction at the given permeability
    pub fn cation(permeability_per_sec: f64) -> Self {
        Self {
            mode: ParacellularMode::Cation,
            cation_permeability_per_sec: permeability_per_sec,
            ..Self::default()
        }
    }

    /// Shorthand for an anion-selective junction at the given permeability
    pub fn anion(permeability_per_sec: f64) -> Self {
        Self {
            mode: ParacellularMode::Anion,
            anion_permeability_per_sec: permeability_per_sec,
            ..Self::default()
        }
    }

    /// Leak flux for one tick (mM/s per solute)
    ///
    /// Positive values run apical to basolateral, matching the sign
    /// convention of transepithelial flux. Only the solutes selected by the
    /// junction mode are touched.
    pub fn compute_leak(
        &self,
        apical_ecf: &Concentrations,
        basolateral_ecf: &Concentrations,
    ) -> SoluteMap {
        let mut leak = SoluteMap::zero();

        let (solutes, permeability): (&[Solute], f64) = match self.mode {
            ParacellularMode::None => return leak,
            ParacellularMode::Cation => (&CATION_LEAK_SOLUTES, self.cation_permeability_per_sec),
            ParacellularMode::Anion => (&ANION_LEAK_SOLUTES, self.anion_permeability_per_sec),
        };

        for &solute in solutes {
            let gradient = apical_ecf.get(solute) - basolateral_ecf.get(solute);
            leak.set(solute, permeability * gradient);
        }

        leak
    }

    /// Structural validation, returns human-readable warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.cation_permeability_per_sec < 0.0 {
            warnings.push(format!(
                "cation permeability is negative: {:.3}",
                self.cation_permeability_per_sec
            ));
        }
        if self.anion_permeability_per_sec < 0.0 {
            warnings.push(format!(
                "anion permeability is negative: {:.3}",
                self.anion_permeability_per_sec
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unequal_compartments() -> (Concentrations, Concentrations) {
        let mut apical = Concentrations::new();
        apical.set(Solute::Sodium, 145.0);
        apical.set(Solute::Potassium, 4.0);
        apical.set(Solute::Chloride, 105.0);
        apical.set(Solute::Water, 100.0);

        let mut basolateral = Concentrations::new();
        basolateral.set(Solute::Sodium, 100.0);
        basolateral.set(Solute::Potassium, 10.0);
        basolateral.set(Solute::Chloride, 90.0);
        basolateral.set(Solute::Water, 100.0);

        (apical, basolateral)
    }

    #[test]
    fn test_no_junction_no_leak() {
        let (apical, basolateral) = unequal_compartments();
        let leak = ParacellularSettings::default().compute_leak(&apical, &basolateral);
        assert!(leak.is_zero());
    }

    #[test]
    fn test_cation_leak_touches_only_cation_set() {
        let (apical, basolateral) = unequal_compartments();
        let leak = ParacellularSettings::cation(1.0).compute_leak(&apical, &basolateral);

        assert!((leak.get(Solute::Sodium) - 45.0).abs() < 1e-12);
        assert!((leak.get(Solute::Potassium) - (-6.0)).abs() < 1e-12);
        assert_eq!(leak.get(Solute::Water), 0.0, "equal water gives no leak");
        assert_eq!(leak.get(Solute::Chloride), 0.0);
        assert_eq!(leak.get(Solute::Bicarbonate), 0.0);
    }

    #[test]
    fn test_anion_leak_touches_only_anion_set() {
        let (apical, basolateral) = unequal_compartments();
        let leak = ParacellularSettings::anion(0.5).compute_leak(&apical, &basolateral);

        assert!((leak.get(Solute::Chloride) - 7.5).abs() < 1e-12);
        assert_eq!(leak.get(Solute::Sodium), 0.0);
        assert_eq!(leak.get(Solute::Potassium), 0.0);
        assert_eq!(leak.get(Solute::Water), 0.0);
    }

    #[test]
    fn test_leak_sign_follows_apical_minus_basolateral() {
        let (apical, basolateral) = unequal_compartments();
        let leak = ParacellularSettings::cation(2.0).compute_leak(&apical, &basolateral);

        // Apical Na+ is higher: flux runs toward the basolateral side
        assert!(leak.get(Solute::Sodium) > 0.0);
        // Apical K+ is lower: flux runs toward the apical side
        assert!(leak.get(Solute::Potassium) < 0.0);
    }
}
