//! Transporter catalog and canonical scenarios.
//!
//! Fifteen textbook transporters with literature-scale kinetic constants,
//! plus baseline compartment compositions for a generic absorptive
//! epithelium and two wired demonstration scenarios (small-intestinal
//! glucose absorption, crypt-style chloride secretion). Catalog entries
//! come back unplaced; a scenario is built by assigning placements.
//!
//! Kinetic constants are tuned for readable per-second fluxes at baseline
//! concentrations rather than fitted to any one preparation.
//!
//! References:
//! - Wright EM, Loo DDF, Hirayama BA. Physiol Rev. 2011;91:733-794
//! - Greger R. Physiol Rev. 1985;65:760-797
//! - Boron WF, Boulpaep EL. Medical Physiology. 3rd ed. 2016

use serde::{Deserialize, Serialize};

use crate::solver::Scenario;
use crate::transport::{
    default_rules, CompartmentSide, Concentrations, GradientSense, KineticLaw, Kinetics,
    ParacellularSettings, Placement, Solute, Stoichiometry, Transporter, TransporterClass,
};

/// Na+:glucose coupling variant of the SGLT carrier
///
/// SGLT1 (intestine, late proximal tubule) couples two Na+ per glucose and
/// can pump sugar against a steep gradient; SGLT2 (early proximal tubule)
/// couples one. The switch swaps the stoichiometry atomically at
/// configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SgltIsoform {
    #[default]
    #[serde(rename = "SGLT1")]
    Sglt1,
    #[serde(rename = "SGLT2")]
    Sglt2,
}

impl SgltIsoform {
    /// Stoichiometry for this isoform
    pub fn stoichiometry(&self) -> Stoichiometry {
        match self {
            SgltIsoform::Sglt1 => {
                Stoichiometry::new(vec![(Solute::Sodium, 2), (Solute::Glucose, 1)])
            }
            SgltIsoform::Sglt2 => {
                Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::Glucose, 1)])
            }
        }
    }
}

/// Aquaporin water channel
///
/// Carries no solute; its movement is handled entirely by the
/// solute-coupled water step of the aggregator, so the kinetic law is
/// never dispatched.
pub fn aquaporin() -> Transporter {
    Transporter::new(
        "AQP",
        "Aquaporin",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Water, 1)]),
        Kinetics::new(1.0, 1.0),
    )
}

/// Na+/glucose cotransporter (apical workhorse of sugar absorption)
pub fn sglt(isoform: SgltIsoform) -> Transporter {
    Transporter::new(
        "SGLT",
        "Na+/glucose cotransporter",
        TransporterClass::Symporter,
        isoform.stoichiometry(),
        Kinetics::new(0.8, 1.0),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// Na+/K+/2Cl- cotransporter (basolateral Cl- loader of secretory cells)
pub fn nkcc() -> Transporter {
    Transporter::new(
        "NKCC",
        "Na+/K+/2Cl- cotransporter",
        TransporterClass::Symporter,
        Stoichiometry::new(vec![
            (Solute::Sodium, 1),
            (Solute::Potassium, 1),
            (Solute::Chloride, 2),
        ]),
        Kinetics::new(1.0, 1.0),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// Na+/H+ exchanger
pub fn nhe() -> Transporter {
    Transporter::new(
        "NHE",
        "Na+/H+ exchanger",
        TransporterClass::Antiporter,
        Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::Proton, -1)]),
        Kinetics::new(1.0, 1.0),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// Cl-/HCO3- exchanger
pub fn cl_hco3_exchanger() -> Transporter {
    Transporter::new(
        "ClHCO3Ex",
        "Cl-/HCO3- exchanger",
        TransporterClass::Exchanger,
        Stoichiometry::new(vec![(Solute::Chloride, -1), (Solute::Bicarbonate, 1)]),
        Kinetics::new(0.8, 1.0),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// K+ channel
///
/// Outward sense: at baseline the cell-to-bath K+ gradient drives efflux,
/// recycling the K+ the pump imports.
pub fn potassium_channel() -> Transporter {
    Transporter::new(
        "KChannel",
        "K+ channel",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Potassium, -1)]),
        Kinetics::new(0.8, 1.0),
    )
    .with_law(KineticLaw::GradientChannel {
        sense: GradientSense::Outward,
    })
}

/// Epithelial Na+ channel
///
/// Inward sense: reads the bath-to-cell gradient, so baseline Na+ entry is
/// positive.
pub fn enac() -> Transporter {
    Transporter::new(
        "ENaC",
        "Epithelial Na+ channel",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Sodium, 1)]),
        Kinetics::new(1.0, 1.0),
    )
    .with_law(KineticLaw::GradientChannel {
        sense: GradientSense::Inward,
    })
}

/// CFTR Cl- channel
///
/// Outward sense stands in for the depolarized apical membrane of a
/// secreting cell: Cl- leaves the cell even against its concentration
/// gradient, as it does under a real membrane potential.
pub fn cftr() -> Transporter {
    Transporter::new(
        "CFTR",
        "CFTR Cl- channel",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Chloride, 1)]),
        Kinetics::new(1.0, 1.0),
    )
    .with_law(KineticLaw::GradientChannel {
        sense: GradientSense::Outward,
    })
}

/// Na+/K+-ATPase (3 Na+ out, 2 K+ in per cycle)
pub fn na_k_atpase() -> Transporter {
    Transporter::new(
        "NaKATPase",
        "Na+/K+-ATPase",
        TransporterClass::Pump,
        Stoichiometry::new(vec![(Solute::Sodium, -3), (Solute::Potassium, 2)]),
        Kinetics::new(1.2, 1.0),
    )
    .with_law(KineticLaw::MultiTermPump {
        pools: vec![
            (Solute::Sodium, CompartmentSide::Intracellular),
            (Solute::Potassium, CompartmentSide::External),
            (Solute::Potassium, CompartmentSide::Intracellular),
        ],
    })
}

/// Facilitated glucose carrier (GLUT2)
///
/// Outward sense: exports the sugar the apical SGLT accumulates.
pub fn glut2() -> Transporter {
    Transporter::new(
        "GLUT2",
        "Facilitated glucose carrier",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Glucose, -1)]),
        Kinetics::new(1.0, 1.0),
    )
    .with_law(KineticLaw::GradientChannel {
        sense: GradientSense::Outward,
    })
}

/// Na+/HCO3- cotransporter
pub fn nbc() -> Transporter {
    Transporter::new(
        "NBC",
        "Na+/HCO3- cotransporter",
        TransporterClass::Symporter,
        Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::Bicarbonate, 3)]),
        Kinetics::new(0.7, 2.0),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// Vacuolar-type H+-ATPase, saturates on intracellular H+
pub fn h_atpase() -> Transporter {
    Transporter::new(
        "HATPase",
        "H+-ATPase",
        TransporterClass::Pump,
        Stoichiometry::new(vec![(Solute::Proton, -1)]),
        Kinetics::new(0.9, 1.0),
    )
    .with_law(KineticLaw::SingleSiteMM {
        substrate: Solute::Proton,
        side: CompartmentSide::Intracellular,
    })
}

/// Epithelial Ca2+ channel (TRPV6)
///
/// Small Vmax and Km: intracellular free Ca2+ sits four orders of magnitude
/// below the bath, so entry saturates almost immediately.
pub fn trpv6() -> Transporter {
    Transporter::new(
        "TRPV6",
        "Epithelial Ca2+ channel",
        TransporterClass::Channel,
        Stoichiometry::new(vec![(Solute::Calcium, 1)]),
        Kinetics::new(0.2, 0.05),
    )
    .with_law(KineticLaw::GradientChannel {
        sense: GradientSense::Inward,
    })
}

/// Plasma-membrane Ca2+-ATPase, saturates on intracellular Ca2+
pub fn pmca() -> Transporter {
    Transporter::new(
        "PMCA",
        "Plasma-membrane Ca2+-ATPase",
        TransporterClass::Pump,
        Stoichiometry::new(vec![(Solute::Calcium, -1)]),
        Kinetics::new(0.3, 0.5),
    )
    .with_law(KineticLaw::SingleSiteMM {
        substrate: Solute::Calcium,
        side: CompartmentSide::Intracellular,
    })
}

/// Na+-coupled amino-acid transporter
pub fn naat() -> Transporter {
    Transporter::new(
        "NAAT",
        "Na+-coupled amino-acid transporter",
        TransporterClass::Symporter,
        Stoichiometry::new(vec![(Solute::Sodium, 1), (Solute::AminoAcid, 1)]),
        Kinetics::new(0.6, 0.5),
    )
    .with_law(KineticLaw::MultiSiteLimitingMM)
}

/// The full catalog in display order, all unplaced
pub fn default_transporters(isoform: SgltIsoform) -> Vec<Transporter> {
    vec![
        aquaporin(),
        sglt(isoform),
        nkcc(),
        nhe(),
        cl_hco3_exchanger(),
        potassium_channel(),
        enac(),
        cftr(),
        na_k_atpase(),
        glut2(),
        nbc(),
        h_atpase(),
        trpv6(),
        pmca(),
        naat(),
    ]
}

fn baseline_extracellular() -> Concentrations {
    let mut c = Concentrations::new();
    c.set(Solute::Sodium, 145.0);
    c.set(Solute::Potassium, 4.0);
    c.set(Solute::Chloride, 105.0);
    c.set(Solute::Bicarbonate, 24.0);
    c.set(Solute::Calcium, 1.2);
    c.set(Solute::Proton, 4e-5);
    c.set(Solute::Glucose, 5.0);
    c.set(Solute::AminoAcid, 2.0);
    c.set(Solute::Water, 100.0);
    c
}

/// Interstitial-like apical bath
pub fn baseline_apical_ecf() -> Concentrations {
    baseline_extracellular()
}

/// Interstitial-like basolateral bath (identical to the apical baseline, so
/// any transepithelial asymmetry comes from transporter placement alone)
pub fn baseline_basolateral_ecf() -> Concentrations {
    baseline_extracellular()
}

/// Typical epithelial cytosol
pub fn baseline_icf() -> Concentrations {
    let mut c = Concentrations::new();
    c.set(Solute::Sodium, 12.0);
    c.set(Solute::Potassium, 140.0);
    c.set(Solute::Chloride, 10.0);
    c.set(Solute::Bicarbonate, 10.0);
    c.set(Solute::Calcium, 1e-4);
    c.set(Solute::Proton, 2e-5);
    c.set(Solute::Glucose, 1.0);
    c.set(Solute::AminoAcid, 8.0);
    c.set(Solute::Water, 100.0);
    c
}

/// Baseline scenario: full catalog, nothing placed
///
/// The natural starting point for interactive callers that assign
/// placements one at a time.
pub fn baseline_scenario(paracellular: ParacellularSettings, isoform: SgltIsoform) -> Scenario {
    Scenario {
        transporters: default_transporters(isoform),
        apical_ecf: baseline_apical_ecf(),
        basolateral_ecf: baseline_basolateral_ecf(),
        paracellular,
        rules: default_rules(),
    }
}

/// Small-intestinal glucose absorption
///
/// SGLT pulls glucose in across the apical membrane on the Na+ gradient,
/// GLUT2 lets it out the back, the pump keeps the gradient and a doubled
/// K+ conductance recycles pump K+. Water channels on both membranes open
/// the transcellular osmotic path.
pub fn glucose_absorption_scenario(isoform: SgltIsoform) -> Scenario {
    Scenario {
        transporters: vec![
            aquaporin().with_placement(Placement::Both),
            sglt(isoform).with_placement(Placement::Apical),
            glut2().with_placement(Placement::Basolateral),
            na_k_atpase().with_placement(Placement::Basolateral),
            potassium_channel()
                .with_placement(Placement::Basolateral)
                .with_density(2.0),
        ],
        apical_ecf: baseline_apical_ecf(),
        basolateral_ecf: baseline_basolateral_ecf(),
        paracellular: ParacellularSettings::default(),
        rules: default_rules(),
    }
}

/// Crypt-style chloride secretion
///
/// NKCC loads Cl- above equilibrium across the basolateral membrane and
/// CFTR releases it apically; the cation-selective junction closes the
/// circuit the way Na+ follows through leaky tight junctions in vivo.
pub fn chloride_secretion_scenario() -> Scenario {
    Scenario {
        transporters: vec![
            nkcc().with_placement(Placement::Basolateral),
            potassium_channel().with_placement(Placement::Basolateral),
            na_k_atpase().with_placement(Placement::Basolateral),
            cftr().with_placement(Placement::Apical),
        ],
        apical_ecf: baseline_apical_ecf(),
        basolateral_ecf: baseline_basolateral_ecf(),
        paracellular: ParacellularSettings::cation(1.0),
        rules: default_rules(),
    }
}
