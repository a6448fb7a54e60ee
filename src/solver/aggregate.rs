//! Transepithelial aggregation over the converged membrane flux maps.
//!
//! Pure post-processing: no state is advanced here. A solute crosses the
//! barrier transcellularly only when its apical and basolateral fluxes
//! oppose in sign (in at one membrane, out at the other); the through-flux
//! is the smaller magnitude of the two. The paracellular leak bypasses the
//! cell and is credited unconditionally. Water follows the net solute flux
//! with a capped coupling factor rather than an osmotic calculation; this
//! is a deliberate teaching simplification and not a volume model.
//!
//! The charge indicator mimics the sign of the transepithelial potential
//! that directed ion transport would build up. It is a qualitative label,
//! not a Nernst or GHK potential.
//!
//! References:
//! - Ussing HH, Zerahn K. Acta Physiol Scand. 1951;23:110-127
//! - Frizzell RA, Hanrahan JW. Cold Spring Harb Perspect Med. 2012;2:a009563

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transport::{
    ParacellularMode, ParacellularSettings, Placement, Solute, SoluteMap, Transporter,
};

/// Fraction of the net solute flux that water follows
pub const WATER_COUPLING_FACTOR: f64 = 0.5;
/// Cap on the solute sum feeding the water coupling (mM/sec)
pub const WATER_FLUX_CAP_MM_PER_SEC: f64 = 5.0;
/// |tep| above this classifies as "large"
pub const TEP_LARGE_THRESHOLD: f64 = 2.0;
/// |tep| below this classifies as neutral
pub const TEP_SMALL_THRESHOLD: f64 = 0.1;

/// Solutes whose transcellular flux is subject to pathway pairing under
/// [`TransepithelialGating::RequirePairedPathways`]
pub const GATED_TE_SOLUTES: [Solute; 3] = [Solute::Potassium, Solute::Proton, Solute::Bicarbonate];

/// Policy for crediting transcellular K+/H+/HCO3- flux
///
/// Sign opposition alone can credit a through-flux for these solutes when
/// the opposing membrane fluxes come from unrelated machinery (e.g. two
/// independent channels both leaking K+). The stricter policy additionally
/// demands a structural importer on the entry membrane and exporter on the
/// exit membrane before counting the transcellular term. The paracellular
/// term is never gated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransepithelialGating {
    /// Opposing membrane flux signs are sufficient
    #[default]
    SignOpposition,
    /// K+/H+/HCO3- additionally need stoichiometric entry and exit pathways
    RequirePairedPathways,
}

/// Qualitative label for the transepithelial potential indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TepClassification {
    ApicalPositiveLarge,
    ApicalPositive,
    #[default]
    Neutral,
    ApicalNegative,
    ApicalNegativeLarge,
}

impl TepClassification {
    /// Classify a charge indicator value
    pub fn classify(tep: f64) -> Self {
        if tep > TEP_LARGE_THRESHOLD {
            TepClassification::ApicalPositiveLarge
        } else if tep > TEP_SMALL_THRESHOLD {
            TepClassification::ApicalPositive
        } else if tep < -TEP_LARGE_THRESHOLD {
            TepClassification::ApicalNegativeLarge
        } else if tep < -TEP_SMALL_THRESHOLD {
            TepClassification::ApicalNegative
        } else {
            TepClassification::Neutral
        }
    }

    /// Display string used in summaries and exports
    pub fn label(&self) -> &'static str {
        match self {
            TepClassification::ApicalPositiveLarge => "Apical positive (large)",
            TepClassification::ApicalPositive => "Apical positive",
            TepClassification::Neutral => "Neutral",
            TepClassification::ApicalNegative => "Apical negative",
            TepClassification::ApicalNegativeLarge => "Apical negative (large)",
        }
    }
}

impl fmt::Display for TepClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn covers(placement: Placement, side: Placement) -> bool {
    placement == side || placement == Placement::Both
}

/// Entry importer and exit exporter check for the paired-pathway policy
///
/// Absorption enters apically and exits basolaterally; secretion is the
/// mirror image. The check is structural (stoichiometric sign), not a check
/// on the realized flux direction.
fn has_paired_pathways(
    transporters: &[Transporter],
    active: &[bool],
    solute: Solute,
    absorbing: bool,
) -> bool {
    let (entry, exit) = if absorbing {
        (Placement::Apical, Placement::Basolateral)
    } else {
        (Placement::Basolateral, Placement::Apical)
    };

    let importer = transporters.iter().enumerate().any(|(i, t)| {
        active.get(i).copied().unwrap_or(true)
            && covers(t.placement, entry)
            && t.stoichiometry.imports(solute)
    });
    let exporter = transporters.iter().enumerate().any(|(i, t)| {
        active.get(i).copied().unwrap_or(true)
            && covers(t.placement, exit)
            && t.stoichiometry.exports(solute)
    });
    importer && exporter
}

fn has_water_channel_on(transporters: &[Transporter], active: &[bool], side: Placement) -> bool {
    transporters.iter().enumerate().any(|(i, t)| {
        active.get(i).copied().unwrap_or(true)
            && t.is_water_channel()
            && covers(t.placement, side)
    })
}

/// Capped water-follows-solute coupling, mirrored into the membrane maps
///
/// Returns the transcellular water flux (0 when no water pathway exists or
/// the solute sum is exactly zero).
fn coupled_water_flux(
    transporters: &[Transporter],
    active: &[bool],
    paracellular: &ParacellularSettings,
    non_water_sum: f64,
    apical_flux: &mut SoluteMap,
    basolateral_flux: &mut SoluteMap,
) -> f64 {
    let transcellular_path = has_water_channel_on(transporters, active, Placement::Apical)
        && has_water_channel_on(transporters, active, Placement::Basolateral);
    let paracellular_path = paracellular.mode == ParacellularMode::Cation;
    if !(transcellular_path || paracellular_path) || non_water_sum == 0.0 {
        return 0.0;
    }

    let coupled = WATER_COUPLING_FACTOR
        * non_water_sum.signum()
        * non_water_sum.abs().min(WATER_FLUX_CAP_MM_PER_SEC);
    // Record the through-cell path on both membranes so per-membrane charts
    // show water moving with the solute stream.
    apical_flux.add(Solute::Water, coupled);
    basolateral_flux.add(Solute::Water, -coupled);
    coupled
}

/// Per-solute transepithelial fluxes from the final membrane and leak maps
///
/// Positive values are absorption (apical to basolateral), negative are
/// secretion. Entries come back in [`Solute::ALL`] order with water last.
/// The membrane maps are taken mutably so the derived water flux can be
/// mirrored into them.
pub fn transepithelial_fluxes(
    transporters: &[Transporter],
    active: &[bool],
    gating: TransepithelialGating,
    paracellular: &ParacellularSettings,
    apical_flux: &mut SoluteMap,
    basolateral_flux: &mut SoluteMap,
    paracellular_flux: &SoluteMap,
) -> Vec<(Solute, f64)> {
    let mut te = Vec::with_capacity(Solute::COUNT);
    let mut non_water_sum = 0.0;

    for solute in Solute::ALL {
        if solute == Solute::Water {
            // All non-water solutes precede water in ALL, so the sum is
            // complete by the time we reach it.
            let water = coupled_water_flux(
                transporters,
                active,
                paracellular,
                non_water_sum,
                apical_flux,
                basolateral_flux,
            ) + paracellular_flux.get(Solute::Water);
            te.push((Solute::Water, water));
            continue;
        }

        let a = apical_flux.get(solute);
        let b = basolateral_flux.get(solute);
        let mut transcellular = if a > 0.0 && b < 0.0 {
            a.min(b.abs())
        } else if a < 0.0 && b > 0.0 {
            -(a.abs().min(b))
        } else {
            0.0
        };

        if gating == TransepithelialGating::RequirePairedPathways
            && transcellular != 0.0
            && GATED_TE_SOLUTES.contains(&solute)
            && !has_paired_pathways(transporters, active, solute, transcellular > 0.0)
        {
            transcellular = 0.0;
        }

        let flux = transcellular + paracellular_flux.get(solute);
        non_water_sum += flux;
        te.push((solute, flux));
    }

    te
}

/// Charge indicator from the transepithelial fluxes
///
/// Net absorption of positive charge leaves the apical solution negative,
/// so the indicator is the negated valence-weighted flux sum.
pub fn tep_indicator(transepithelial: &[(Solute, f64)]) -> f64 {
    let charge: f64 = transepithelial
        .iter()
        .map(|&(solute, flux)| flux * solute.valence())
        .sum();
    -charge
}
