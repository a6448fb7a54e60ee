//! Activation rules coupling transporters to their physiological partners.
//!
//! Secondary active transport only runs when its driving machinery is in
//! place: the inward Na+ gradient exploited by Na+-coupled transporters
//! exists only while a Na+/K+ pump maintains it, and K+-importing
//! cotransporters depend on a recycling K+ channel in the same membrane.
//! Rather than wiring these dependencies into the kinetics, they are
//! expressed as a declarative rule table evaluated against the placed
//! transporter set; a transporter failing any applicable rule contributes
//! zero flux, as if its Vmax were zero.
//!
//! The rules are placement-only (no concentration terms), so the evaluation
//! is invariant for the duration of a solve.
//!
//! References:
//! - Skou JC. Biochim Biophys Acta. 1957;23:394-401 (the Na+ gradient as energy source)
//! - Greger R. Physiol Rev. 1985;65:760-797 (K+ recycling in NaCl transport)

use super::transporter::{Placement, Transporter, TransporterClass};
use super::Solute;

/// Structural predicate over a transporter definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransporterPattern {
    /// Stoichiometry moves the solute in either direction
    CarriesSolute(Solute),
    /// Symporter with a positive coefficient for the solute
    SymporterImporting(Solute),
    /// Pump-class transporter exporting Na+ and importing K+
    SodiumPotassiumPump,
    /// Channel-class transporter moving the solute
    ChannelCarrying(Solute),
}

impl TransporterPattern {
    /// Does the transporter match this pattern?
    pub fn matches(&self, transporter: &Transporter) -> bool {
        match *self {
            TransporterPattern::CarriesSolute(solute) => transporter.stoichiometry.carries(solute),
            TransporterPattern::SymporterImporting(solute) => {
                transporter.class == TransporterClass::Symporter
                    && transporter.stoichiometry.imports(solute)
            }
            TransporterPattern::SodiumPotassiumPump => {
                transporter.class == TransporterClass::Pump
                    && transporter.stoichiometry.exports(Solute::Sodium)
                    && transporter.stoichiometry.imports(Solute::Potassium)
            }
            TransporterPattern::ChannelCarrying(solute) => {
                transporter.class == TransporterClass::Channel
                    && transporter.stoichiometry.carries(solute)
            }
        }
    }
}

/// Where the required partner must be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementScope {
    /// Any placed membrane position satisfies the rule
    Anywhere,
    /// The partner must share the subject's exact placement
    SameMembrane,
}

/// One activation rule: subjects matching `applies_to` are inactive unless a
/// placed transporter matching `requires` exists within `scope`
#[derive(Debug, Clone)]
pub struct ActivationRule {
    /// Human-readable rule name for diagnostics
    pub name: &'static str,
    /// Which transporters the rule gates
    pub applies_to: TransporterPattern,
    /// Subjects matching this pattern are exempt (e.g. the pump itself)
    pub exempt: Option<TransporterPattern>,
    /// The partner that must be present
    pub requires: TransporterPattern,
    /// Placement relationship between subject and partner
    pub scope: RequirementScope,
}

impl ActivationRule {
    /// Does this rule pass for the subject at `subject_idx`?
    fn passes(&self, subject_idx: usize, transporters: &[Transporter]) -> bool {
        let subject = &transporters[subject_idx];

        if !self.applies_to.matches(subject) {
            return true;
        }
        if let Some(exempt) = &self.exempt {
            if exempt.matches(subject) {
                return true;
            }
        }

        transporters.iter().enumerate().any(|(i, candidate)| {
            if i == subject_idx || candidate.placement == Placement::None {
                return false;
            }
            if !self.requires.matches(candidate) {
                return false;
            }
            match self.scope {
                RequirementScope::Anywhere => true,
                RequirementScope::SameMembrane => candidate.placement == subject.placement,
            }
        })
    }
}

/// The default physiological rule set
///
/// 1. Na+-coupled transport requires a placed Na+/K+ pump anywhere on the
///    barrier (the pump itself is exempt).
/// 2. A K+-importing symporter requires a K+ channel on the same membrane
///    to recycle the imported K+.
pub fn default_rules() -> Vec<ActivationRule> {
    vec![
        ActivationRule {
            name: "sodium-coupled transport requires the Na+/K+ pump",
            applies_to: TransporterPattern::CarriesSolute(Solute::Sodium),
            exempt: Some(TransporterPattern::SodiumPotassiumPump),
            requires: TransporterPattern::SodiumPotassiumPump,
            scope: RequirementScope::Anywhere,
        },
        ActivationRule {
            name: "K+-importing symporter requires a K+ channel on the same membrane",
            applies_to: TransporterPattern::SymporterImporting(Solute::Potassium),
            exempt: None,
            requires: TransporterPattern::ChannelCarrying(Solute::Potassium),
            scope: RequirementScope::SameMembrane,
        },
    ]
}

/// Evaluate all rules against the frozen transporter list
///
/// Returns one flag per transporter; `false` means the transporter is gated
/// off for this solve. Placement itself is not checked here (the flux loop
/// already skips unplaced transporters).
pub fn active_flags(transporters: &[Transporter], rules: &[ActivationRule]) -> Vec<bool> {
    (0..transporters.len())
        .map(|i| rules.iter().all(|rule| rule.passes(i, transporters)))
        .collect()
}
