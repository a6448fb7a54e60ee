//! Kinetic rate laws for membrane transporters.
//!
//! Provides the rate equations used across the transporter catalog:
//! - Michaelis-Menten saturation (single substrate)
//! - Limiting-substrate saturation for cotransporters (the scarcest substrate
//!   relative to its stoichiometric demand sets the cycle rate)
//! - Saturating gradient-driven flux for passive channels
//! - Independent-site saturation for multi-substrate pumps
//! - Sigmoid pH gating
//!
//! Each transporter carries a tagged [`KineticLaw`] chosen when its catalog
//! entry is defined, so the per-step hot loop dispatches on the law variant
//! rather than on transporter names.
//!
//! References:
//! - Michaelis L, Menten ML. Biochemische Zeitschrift. 1913;49:333-369
//! - Segel IH. Enzyme Kinetics. Wiley-Interscience, 1993 (multi-substrate saturation)
//! - Hille B. Ion Channels of Excitable Membranes. 3rd ed. Sinauer, 2001 (channel flux saturation)

use serde::{Deserialize, Serialize};

use super::transporter::{Kinetics, Stoichiometry, Transporter};
use super::{CompartmentSide, Concentrations, Placement, Solute, SoluteMap};

/// Simple Michaelis-Menten kinetics
///
/// v = Vmax * [S] / (Km + [S])
///
/// # Arguments
/// * `vmax_mM_per_sec` - Maximum rate at saturation (mM/s)
/// * `km_mM` - Half-saturation constant (mM)
/// * `s_mM` - Substrate concentration (mM)
#[inline]
pub fn michaelis_menten(vmax_mM_per_sec: f64, km_mM: f64, s_mM: f64) -> f64 {
    if s_mM <= 0.0 {
        return 0.0;
    }
    vmax_mM_per_sec * s_mM / (km_mM + s_mM)
}

/// Unitless Michaelis-Menten occupancy term
///
/// [S] / (Km + [S]), clamped to zero for non-positive substrate. Used for
/// the independent terms of multi-substrate pumps.
#[inline]
pub fn saturation_fraction(km_mM: f64, s_mM: f64) -> f64 {
    if s_mM <= 0.0 {
        return 0.0;
    }
    s_mM / (km_mM + s_mM)
}

/// Saturating bidirectional rate for gradient-driven channels
///
/// v = Vmax * |g| / (Km + |g|) * sign(g)
///
/// The gradient magnitude saturates like a Michaelis-Menten substrate, and
/// the sign of the gradient carries through so flux reverses when the
/// gradient reverses.
///
/// # Arguments
/// * `vmax_mM_per_sec` - Maximum rate at saturation (mM/s)
/// * `km_mM` - Half-saturation gradient (mM)
/// * `gradient_mM` - Signed concentration difference (mM)
#[inline]
pub fn saturating_gradient_rate(vmax_mM_per_sec: f64, km_mM: f64, gradient_mM: f64) -> f64 {
    if gradient_mM == 0.0 {
        return 0.0;
    }
    let magnitude = gradient_mM.abs();
    vmax_mM_per_sec * magnitude / (km_mM + magnitude) * gradient_mM.signum()
}

/// Limiting substrate availability for a cotransport cycle
///
/// For each stoichiometry entry the availability is S / |n|, the substrate
/// concentration divided by the copies needed per cycle, read from the side
/// the substrate is consumed from (positive coefficients from the external
/// fluid, negative coefficients from the cell). The smallest availability
/// limits the whole cycle; any absent substrate gates the cycle to zero.
///
/// Water entries are ignored (water never participates in solute kinetics).
pub fn limiting_availability(
    stoichiometry: &Stoichiometry,
    external: &Concentrations,
    intracellular: &Concentrations,
) -> f64 {
    let mut limiting = f64::INFINITY;
    let mut saw_substrate = false;

    for &(solute, coeff) in stoichiometry.entries() {
        if solute == Solute::Water || coeff == 0 {
            continue;
        }
        let source = if coeff > 0 { external } else { intracellular };
        let availability = source.get(solute).max(0.0) / f64::from(coeff.abs());
        if availability < limiting {
            limiting = availability;
        }
        saw_substrate = true;
    }

    if saw_substrate {
        limiting
    } else {
        0.0
    }
}

/// Sigmoid pH gate
///
/// gate = 1 / (1 + exp((pH - pH50) / sigma))
///
/// Evaluates to 1/2 at `ph50` and rises monotonically as pH falls, matching
/// acid-activated transport. `sigma` sets the steepness.
#[inline]
pub fn ph_gate(ph: f64, ph50: f64, sigma: f64) -> f64 {
    1.0 / (1.0 + ((ph - ph50) / sigma).exp())
}

/// Orientation of a gradient channel's positive-flux direction
///
/// `Outward` reads the gradient as intracellular minus external, so a cell
/// above the bath gives a positive rate (an exporting coefficient then moves
/// solute downhill out of the cell). `Inward` reads external minus
/// intracellular, so entry down the bath-to-cell gradient is positive.
/// Each catalog entry documents which sense it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientSense {
    /// Gradient = intracellular - external
    Outward,
    /// Gradient = external - intracellular
    Inward,
}

/// Tagged rate law attached to each transporter definition
///
/// Selected at configuration time; the solver dispatches on the variant
/// without inspecting transporter identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KineticLaw {
    /// Michaelis-Menten on one substrate read from one compartment
    SingleSiteMM {
        /// Substrate the rate saturates on
        substrate: Solute,
        /// Compartment the substrate is read from
        side: CompartmentSide,
    },
    /// Cotransport limited by the scarcest substrate (see
    /// [`limiting_availability`])
    MultiSiteLimitingMM,
    /// Passive bidirectional channel driven by the concentration difference
    /// of the single transported solute
    GradientChannel {
        /// Which direction counts as a positive gradient
        sense: GradientSense,
    },
    /// Pump rate set by the smallest of independent saturation terms, one
    /// per limiting substrate pool
    MultiTermPump {
        /// (substrate, compartment) pairs, each contributing S/(Km+S)
        pools: Vec<(Solute, CompartmentSide)>,
    },
}

impl KineticLaw {
    /// Fallback law for a transporter defined without an explicit one:
    /// Michaelis-Menten on the first solute named in the stoichiometry,
    /// read from the external side
    pub fn default_for(stoichiometry: &Stoichiometry) -> Self {
        match stoichiometry.first_solute() {
            Some(substrate) => KineticLaw::SingleSiteMM {
                substrate,
                side: CompartmentSide::External,
            },
            None => KineticLaw::MultiSiteLimitingMM,
        }
    }

    /// Base cycle rate (mM/s) before density and pH scaling
    ///
    /// `external` is the fluid facing the transporter's membrane; the caller
    /// resolves apical vs basolateral from the placement.
    pub fn rate(
        &self,
        kinetics: &Kinetics,
        stoichiometry: &Stoichiometry,
        external: &Concentrations,
        intracellular: &Concentrations,
    ) -> f64 {
        match self {
            KineticLaw::SingleSiteMM { substrate, side } => {
                let s = side_concentration(*substrate, *side, external, intracellular);
                michaelis_menten(kinetics.vmax_mM_per_sec, kinetics.km_mM, s)
            }
            KineticLaw::MultiSiteLimitingMM => {
                let limiting = limiting_availability(stoichiometry, external, intracellular);
                michaelis_menten(kinetics.vmax_mM_per_sec, kinetics.km_mM, limiting)
            }
            KineticLaw::GradientChannel { sense } => {
                let solute = match stoichiometry.first_solute() {
                    Some(s) => s,
                    None => return 0.0,
                };
                let gradient = match sense {
                    GradientSense::Outward => {
                        intracellular.get(solute) - external.get(solute)
                    }
                    GradientSense::Inward => {
                        external.get(solute) - intracellular.get(solute)
                    }
                };
                saturating_gradient_rate(kinetics.vmax_mM_per_sec, kinetics.km_mM, gradient)
            }
            KineticLaw::MultiTermPump { pools } => {
                if pools.is_empty() {
                    return 0.0;
                }
                let mut limiting_term = f64::INFINITY;
                for &(solute, side) in pools {
                    let s = side_concentration(solute, side, external, intracellular);
                    let term = saturation_fraction(kinetics.km_mM, s);
                    if term < limiting_term {
                        limiting_term = term;
                    }
                }
                kinetics.vmax_mM_per_sec * limiting_term
            }
        }
    }
}

#[inline]
fn side_concentration(
    solute: Solute,
    side: CompartmentSide,
    external: &Concentrations,
    intracellular: &Concentrations,
) -> f64 {
    match side {
        CompartmentSide::External => external.get(solute),
        CompartmentSide::Intracellular => intracellular.get(solute),
    }
}

/// Full cycle rate of one transporter (mM/s)
///
/// Applies the transporter's rate law, its optional pH gate (evaluated on
/// intracellular pH), and its expression density. Pure water channels always
/// return zero here; water movement is derived downstream from the
/// aggregated solute flux.
pub fn transport_rate(
    transporter: &Transporter,
    external: &Concentrations,
    intracellular: &Concentrations,
) -> f64 {
    if transporter.is_water_channel() {
        return 0.0;
    }

    let base = transporter.law.rate(
        &transporter.kinetics,
        &transporter.stoichiometry,
        external,
        intracellular,
    );

    let gated = match &transporter.ph_modulation {
        Some(modulation) => base * ph_gate(intracellular.ph(), modulation.ph50, modulation.sigma),
        None => base,
    };

    gated * transporter.density
}

/// Evaluate one tick of transmembrane fluxes against a state snapshot
///
/// Returns (apical, basolateral) flux maps in mM/s, positive into the cell.
/// Transporters that are unplaced, inactive, placed on both membranes, or
/// pure water channels contribute nothing.
pub fn membrane_fluxes(
    transporters: &[Transporter],
    active: &[bool],
    apical_ecf: &Concentrations,
    intracellular: &Concentrations,
    basolateral_ecf: &Concentrations,
) -> (SoluteMap, SoluteMap) {
    let mut apical_flux = SoluteMap::zero();
    let mut basolateral_flux = SoluteMap::zero();

    for (i, transporter) in transporters.iter().enumerate() {
        if !active.get(i).copied().unwrap_or(true) {
            continue;
        }
        let (external, fluxes) = match transporter.placement {
            Placement::Apical => (apical_ecf, &mut apical_flux),
            Placement::Basolateral => (basolateral_ecf, &mut basolateral_flux),
            // Both is reserved for water channels, which carry no solute.
            Placement::None | Placement::Both => continue,
        };

        let rate = transport_rate(transporter, external, intracellular);
        if rate != 0.0 {
            transporter.stoichiometry.distribute(rate, fluxes);
        }
    }

    (apical_flux, basolateral_flux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::transporter::TransporterClass;

    fn concentrations(pairs: &[(Solute, f64)]) -> Concentrations {
        let mut c = Concentrations::new();
        for &(s, v) in pairs {
            c.set(s, v);
        }
        c
    }

    #[test]
    fn test_michaelis_menten_half_saturation() {
        // At [S] = Km, rate is Vmax/2
        let rate = michaelis_menten(1.0, 0.5, 0.5);
        assert!((rate - 0.5).abs() < 1e-12);

        // At high [S], rate approaches Vmax
        let rate_high = michaelis_menten(1.0, 0.5, 500.0);
        assert!((rate_high - 1.0).abs() < 0.01);

        // At zero substrate, rate is zero
        assert_eq!(michaelis_menten(1.0, 0.5, 0.0), 0.0);
    }

    #[test]
    fn test_gradient_rate_sign_follows_gradient() {
        let forward = saturating_gradient_rate(1.0, 1.0, 10.0);
        let reverse = saturating_gradient_rate(1.0, 1.0, -10.0);

        assert!(forward > 0.0);
        assert!((forward + reverse).abs() < 1e-12, "rates must mirror");
        assert_eq!(saturating_gradient_rate(1.0, 1.0, 0.0), 0.0);

        // Magnitude saturates below Vmax
        assert!(saturating_gradient_rate(1.0, 1.0, 1e6) < 1.0 + 1e-9);
    }

    #[test]
    fn test_limiting_availability_picks_scarcest_substrate() {
        // 2 Na+ + 1 glucose per cycle: Na+ at 145 gives 72.5 cycles of
        // supply, glucose at 5 gives 5, so glucose limits.
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, 2), (Solute::Glucose, 1)]);
        let external = concentrations(&[(Solute::Sodium, 145.0), (Solute::Glucose, 5.0)]);
        let icf = Concentrations::new();

        let limiting = limiting_availability(&stoich, &external, &icf);
        assert!((limiting - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_limiting_availability_zero_substrate_gates_cycle() {
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, 2), (Solute::Glucose, 1)]);
        let external = concentrations(&[(Solute::Sodium, 145.0)]); // no glucose
        let icf = Concentrations::new();

        assert_eq!(limiting_availability(&stoich, &external, &icf), 0.0);
    }

    #[test]
    fn test_limiting_availability_reads_export_side_from_cell() {
        // Na+ in / H+ out: Na+ read externally, H+ read intracellularly
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::Proton, -1)]);
        let external = concentrations(&[(Solute::Sodium, 145.0), (Solute::Proton, 1.0)]);
        let icf = concentrations(&[(Solute::Proton, 2e-5)]);

        let limiting = limiting_availability(&stoich, &external, &icf);
        assert!(
            (limiting - 2e-5).abs() < 1e-12,
            "intracellular H+ must limit, got {}",
            limiting
        );
    }

    #[test]
    fn test_ph_gate_midpoint_and_monotonicity() {
        assert!((ph_gate(4.7, 4.7, 0.3) - 0.5).abs() < 1e-12);

        // More acidic (lower pH) opens the gate further
        let acidic = ph_gate(4.0, 4.7, 0.3);
        let alkaline = ph_gate(5.4, 4.7, 0.3);
        assert!(acidic > 0.5 && alkaline < 0.5);
        assert!(acidic > alkaline);
    }

    #[test]
    fn test_multi_term_pump_takes_smallest_term() {
        let law = KineticLaw::MultiTermPump {
            pools: vec![
                (Solute::Sodium, CompartmentSide::Intracellular),
                (Solute::Potassium, CompartmentSide::External),
            ],
        };
        let kinetics = Kinetics::new(1.2, 1.0);
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, -3), (Solute::Potassium, 2)]);

        let external = concentrations(&[(Solute::Potassium, 4.0)]);
        let icf = concentrations(&[(Solute::Sodium, 12.0)]);

        // Na term = 12/13, K term = 4/5; K limits
        let rate = law.rate(&kinetics, &stoich, &external, &icf);
        assert!((rate - 1.2 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_channel_senses_mirror() {
        let kinetics = Kinetics::new(1.0, 1.0);
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, 1)]);
        let external = concentrations(&[(Solute::Sodium, 145.0)]);
        let icf = concentrations(&[(Solute::Sodium, 12.0)]);

        let inward = KineticLaw::GradientChannel {
            sense: GradientSense::Inward,
        }
        .rate(&kinetics, &stoich, &external, &icf);
        let outward = KineticLaw::GradientChannel {
            sense: GradientSense::Outward,
        }
        .rate(&kinetics, &stoich, &external, &icf);

        assert!(inward > 0.0, "bath-to-cell gradient is positive inward");
        assert!((inward + outward).abs() < 1e-12);
    }

    #[test]
    fn test_transport_rate_applies_density_and_ph_gate() {
        let stoich = Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::Proton, -1)]);
        let external = concentrations(&[(Solute::Sodium, 145.0)]);
        let icf = concentrations(&[(Solute::Proton, 2e-5), (Solute::Sodium, 12.0)]);

        let base = Transporter::new(
            "NHE",
            "Na+/H+ exchanger",
            TransporterClass::Antiporter,
            stoich.clone(),
            Kinetics::new(1.0, 1.0),
        )
        .with_law(KineticLaw::MultiSiteLimitingMM)
        .with_placement(Placement::Apical);

        let nominal = transport_rate(&base, &external, &icf);
        assert!(nominal > 0.0);

        let doubled = base.clone().with_density(2.0);
        assert!((transport_rate(&doubled, &external, &icf) - 2.0 * nominal).abs() < 1e-12);

        // Gate pinned at its midpoint halves the rate
        let gated = base.with_ph_modulation(crate::transport::PhModulation {
            ph50: icf.ph(),
            sigma: 0.3,
        });
        assert!((transport_rate(&gated, &external, &icf) - 0.5 * nominal).abs() < 1e-12);
    }

    #[test]
    fn test_water_channel_rate_is_zero() {
        let aqp = Transporter::new(
            "AQP",
            "Aquaporin",
            TransporterClass::Channel,
            Stoichiometry::new(vec![(Solute::Water, 1)]),
            Kinetics::new(1.0, 1.0),
        );
        let external = concentrations(&[(Solute::Water, 100.0)]);
        let icf = concentrations(&[(Solute::Water, 50.0)]);

        assert_eq!(transport_rate(&aqp, &external, &icf), 0.0);
    }

    #[test]
    fn test_membrane_fluxes_route_by_placement() {
        let apical_channel = Transporter::new(
            "ENaC",
            "Epithelial Na+ channel",
            TransporterClass::Channel,
            Stoichiometry::new(vec![(Solute::Sodium, 1)]),
            Kinetics::new(1.0, 1.0),
        )
        .with_law(KineticLaw::GradientChannel {
            sense: GradientSense::Inward,
        })
        .with_placement(Placement::Apical);

        let basolateral_channel = Transporter::new(
            "KChannel",
            "K+ channel",
            TransporterClass::Channel,
            Stoichiometry::new(vec![(Solute::Potassium, -1)]),
            Kinetics::new(0.8, 1.0),
        )
        .with_law(KineticLaw::GradientChannel {
            sense: GradientSense::Outward,
        })
        .with_placement(Placement::Basolateral);

        let transporters = vec![apical_channel, basolateral_channel];
        let active = vec![true, true];

        let apical = concentrations(&[(Solute::Sodium, 145.0), (Solute::Potassium, 4.0)]);
        let basolateral = apical;
        let icf = concentrations(&[(Solute::Sodium, 12.0), (Solute::Potassium, 140.0)]);

        let (a, b) = membrane_fluxes(&transporters, &active, &apical, &icf, &basolateral);

        assert!(a.get(Solute::Sodium) > 0.0, "Na+ enters apically");
        assert_eq!(a.get(Solute::Potassium), 0.0);
        assert!(b.get(Solute::Potassium) < 0.0, "K+ leaves basolaterally");
        assert_eq!(b.get(Solute::Sodium), 0.0);
    }

    #[test]
    fn test_membrane_fluxes_respect_active_flags() {
        let channel = Transporter::new(
            "KChannel",
            "K+ channel",
            TransporterClass::Channel,
            Stoichiometry::new(vec![(Solute::Potassium, -1)]),
            Kinetics::new(0.8, 1.0),
        )
        .with_law(KineticLaw::GradientChannel {
            sense: GradientSense::Outward,
        })
        .with_placement(Placement::Basolateral);

        let external = concentrations(&[(Solute::Potassium, 4.0)]);
        let icf = concentrations(&[(Solute::Potassium, 140.0)]);

        let (_, b) = membrane_fluxes(&[channel], &[false], &external, &icf, &external);
        assert!(b.is_zero(), "inactive transporter must contribute nothing");
    }
}
