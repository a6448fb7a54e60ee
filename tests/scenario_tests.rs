//! End-to-end tests for the bundled physiological scenarios.
//!
//! Tests validate:
//! - Glucose absorption fluxes and the SGLT isoform switch
//! - Chloride secretion with osmotically coupled water
//! - The idle catalog as a strict fixed point
//! - Tight-junction leaks under asymmetric baths

use epithelial_flux::presets::{
    baseline_icf, baseline_scenario, chloride_secretion_scenario, glucose_absorption_scenario,
    SgltIsoform,
};
use epithelial_flux::{solve, ParacellularSettings, SolverConfig, Solute, TepClassification};

#[test]
fn test_glucose_absorption_reference_fluxes() {
    let scenario = glucose_absorption_scenario(SgltIsoform::Sglt1);
    let config = SolverConfig::default();

    let result = solve(&scenario, &config, &baseline_icf());

    let te_glu = result.transepithelial_flux_for(Solute::Glucose);
    let te_na = result.transepithelial_flux_for(Solute::Sodium);
    let te_water = result.transepithelial_flux_for(Solute::Water);
    assert!(te_glu > 0.6 && te_glu < 0.7, "glucose {}", te_glu);
    assert!(te_na > 1.25 && te_na < 1.4, "sodium {}", te_na);
    // Half the solute sum, well under the cap
    assert!(te_water > 0.95 && te_water < 1.05, "water {}", te_water);

    assert!(result.tep > -1.4 && result.tep < -1.25, "tep {}", result.tep);
    assert_eq!(result.tep_classification, TepClassification::ApicalNegative);

    // SGLT holds glucose above the bath and the pump keeps Na+ low
    let glu = result.icf.get(Solute::Glucose);
    assert!(glu > 6.5 && glu < 7.5, "icf glucose {}", glu);
    assert!(result.icf.get(Solute::Sodium) < 1.0);

    // The basolateral K+ channel outruns the pump's K+ import
    assert!(!result.converged);
}

#[test]
fn test_sglt2_halves_the_sodium_coupling() {
    let config = SolverConfig::default();
    let icf = baseline_icf();

    let with_sglt1 = solve(
        &glucose_absorption_scenario(SgltIsoform::Sglt1),
        &config,
        &icf,
    );
    let with_sglt2 = solve(
        &glucose_absorption_scenario(SgltIsoform::Sglt2),
        &config,
        &icf,
    );

    let na1 = with_sglt1.transepithelial_flux_for(Solute::Sodium);
    let na2 = with_sglt2.transepithelial_flux_for(Solute::Sodium);
    assert!(
        na2 < na1,
        "1:1 coupling should move less Na+ per glucose ({} vs {})",
        na2,
        na1
    );
    assert!(na2 > 0.6 && na2 < 0.7, "sodium under SGLT2 {}", na2);
}

#[test]
fn test_chloride_secretion_pulls_water_into_the_lumen() {
    let scenario = chloride_secretion_scenario();
    let config = SolverConfig::default();

    let result = solve(&scenario, &config, &baseline_icf());

    // NKCC loads Cl- faster than CFTR can vent it, so the cell swells
    // with Cl- and the run exhausts its budget
    assert!(!result.converged);
    let cl = result.icf.get(Solute::Chloride);
    assert!(cl > 60.0 && cl < 90.0, "icf Cl- {}", cl);
    assert!(result.icf.get(Solute::Sodium) < 1.0);

    let te_cl = result.transepithelial_flux_for(Solute::Chloride);
    assert!(te_cl > -1.0 && te_cl < -0.9, "chloride {}", te_cl);

    // No water channel, but the cation-selective junction carries the
    // osmotic follow-through
    let te_water = result.transepithelial_flux_for(Solute::Water);
    assert!(te_water > -0.55 && te_water < -0.4, "water {}", te_water);

    assert!(result.tep < -0.9 && result.tep > -1.0, "tep {}", result.tep);
    assert_eq!(result.tep_classification, TepClassification::ApicalNegative);
}

#[test]
fn test_idle_catalog_is_a_fixed_point() {
    // Every preset ships unplaced, so the full catalog moves nothing
    let scenario = baseline_scenario(ParacellularSettings::default(), SgltIsoform::Sglt1);
    let config = SolverConfig::default();

    let result = solve(&scenario, &config, &baseline_icf());

    assert!(result.converged);
    assert_eq!(result.steps, 1);
    assert_eq!(result.icf, baseline_icf());
    for (solute, flux) in &result.transepithelial_flux_mM_per_sec {
        assert_eq!(*flux, 0.0, "{:?} moved in an idle epithelium", solute);
    }
    assert_eq!(result.tep, 0.0);
    assert_eq!(result.tep_classification, TepClassification::Neutral);
}

#[test]
fn test_asymmetric_baths_drive_a_pure_junction_flux() {
    let mut scenario = baseline_scenario(ParacellularSettings::cation(0.5), SgltIsoform::Sglt1);
    scenario.apical_ecf.set(Solute::Sodium, 150.0);
    let config = SolverConfig::default();

    let result = solve(&scenario, &config, &baseline_icf());

    // 5 mM Na+ head at 0.5 /s permeability, no transporter placed
    assert_eq!(result.transepithelial_flux_for(Solute::Sodium), 2.5);
    assert_eq!(result.transepithelial_flux_for(Solute::Potassium), 0.0);

    // The cation-mode junction satisfies the water pathway check
    assert_eq!(result.transepithelial_flux_for(Solute::Water), 1.25);

    assert_eq!(result.tep, -2.5);
    assert_eq!(
        result.tep_classification,
        TepClassification::ApicalNegativeLarge
    );
    assert_eq!(result.tep_classification.label(), "Apical negative (large)");

    // The junction term also feeds the lumped cytosol pool, so a standing
    // leak between fixed baths never converges
    assert!(!result.converged);
    assert!(result.icf.get(Solute::Sodium) > 200.0);
}
