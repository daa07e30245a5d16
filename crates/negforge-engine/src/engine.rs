//! Dialogue-loop facade over the constrained generator.

use std::collections::HashSet;

use negforge_config::GeneratorConfig;
use negforge_core::{AtomicConstraint, NegotiationSpace, Offer, Result, UtilityTable, Value};
use negforge_scoring::{Evaluator, LinearEvaluator};
use tracing::debug;

use crate::constrained::ConstrainedEnumGenerator;

/// Operations a negotiation agent needs from its offer engine.
///
/// A dialogue loop alternates between proposing (`generate_offer`),
/// judging the opponent's proposals (`accepts`) and learning from the
/// opponent's messages (`add_constraint`, `add_utilities`).
pub trait NegotiationEngine {
    /// Next offer to propose, or `Exhausted` when nothing acceptable is left.
    fn generate_offer(&mut self) -> Result<Offer>;

    fn calc_offer_utility(&self, offer: &Offer) -> f64;

    fn add_utilities(&mut self, utilities: &UtilityTable) -> bool;

    fn set_utilities(&mut self, utilities: UtilityTable) -> bool;

    fn add_constraint(&mut self, constraint: AtomicConstraint) -> bool;

    fn add_constraints(&mut self, constraints: &HashSet<AtomicConstraint>) -> bool;

    fn find_violated_constraint(&self, offer: &Offer) -> Option<AtomicConstraint>;

    fn unconstrained_values_by_issue(&self, issue: &str) -> Result<HashSet<Value>>;

    fn constraints(&self) -> &HashSet<AtomicConstraint>;

    fn satisfies_all_constraints(&self, offer: &Offer) -> bool;

    fn accepts(&self, offer: &Offer) -> bool;

    /// False once the engine has nothing left to propose.
    fn can_continue(&self) -> bool;
}

/// Engine backed by a [`ConstrainedEnumGenerator`].
///
/// # Example
///
/// ```
/// use negforge_config::GeneratorConfig;
/// use negforge_core::AtomicConstraint;
/// use negforge_engine::{Engine, NegotiationEngine};
/// use negforge_test::example_scenario;
///
/// let (space, utilities) = example_scenario();
/// let mut engine = Engine::linear(space, utilities, &GeneratorConfig::default()).unwrap();
///
/// let opening = engine.generate_offer().unwrap();
/// assert_eq!(engine.calc_offer_utility(&opening), 200.0);
///
/// engine.add_constraint(AtomicConstraint::new("integer", 9));
/// let next = engine.generate_offer().unwrap();
/// assert!(engine.satisfies_all_constraints(&next));
/// assert_eq!(engine.generated_count(), 2);
/// ```
#[derive(Debug)]
pub struct Engine<E> {
    generator: ConstrainedEnumGenerator<E>,
    accepts_all: bool,
    generated: u64,
}

impl<E: Evaluator> Engine<E> {
    pub fn new(
        space: NegotiationSpace,
        utilities: UtilityTable,
        evaluator: E,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let generator = ConstrainedEnumGenerator::new(space, utilities, evaluator, config, [])?;
        Ok(Self::from_generator(generator))
    }

    pub fn from_generator(generator: ConstrainedEnumGenerator<E>) -> Self {
        Self {
            generator,
            accepts_all: false,
            generated: 0,
        }
    }

    /// Makes `accepts` approve every offer.
    pub fn with_accepts_all(mut self, accepts_all: bool) -> Self {
        self.accepts_all = accepts_all;
        self
    }

    pub fn generator(&self) -> &ConstrainedEnumGenerator<E> {
        &self.generator
    }

    /// Offers proposed through this engine.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }
}

impl Engine<LinearEvaluator> {
    /// Engine scoring offers with a [`LinearEvaluator`] over the same utilities.
    pub fn linear(
        space: NegotiationSpace,
        utilities: UtilityTable,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let evaluator = LinearEvaluator::new(utilities.clone(), config.non_agreement_cost);
        Self::new(space, utilities, evaluator, config)
    }
}

impl<E: Evaluator> NegotiationEngine for Engine<E> {
    fn generate_offer(&mut self) -> Result<Offer> {
        let offer = self.generator.generate_offer()?;
        self.generated += 1;
        Ok(offer)
    }

    fn calc_offer_utility(&self, offer: &Offer) -> f64 {
        self.generator.evaluator().calc_offer_utility(offer)
    }

    fn add_utilities(&mut self, utilities: &UtilityTable) -> bool {
        self.generator.add_utilities(utilities)
    }

    fn set_utilities(&mut self, utilities: UtilityTable) -> bool {
        self.generator.set_utilities(utilities)
    }

    fn add_constraint(&mut self, constraint: AtomicConstraint) -> bool {
        debug!(event = "opponent_constraint", constraint = %constraint);
        self.generator.add_constraint(constraint)
    }

    fn add_constraints(&mut self, constraints: &HashSet<AtomicConstraint>) -> bool {
        self.generator.add_constraints(constraints.iter().cloned())
    }

    fn find_violated_constraint(&self, offer: &Offer) -> Option<AtomicConstraint> {
        self.generator.find_violated_constraint(offer)
    }

    fn unconstrained_values_by_issue(&self, issue: &str) -> Result<HashSet<Value>> {
        self.generator.unconstrained_values_by_issue(issue)
    }

    fn constraints(&self) -> &HashSet<AtomicConstraint> {
        self.generator.constraints()
    }

    fn satisfies_all_constraints(&self, offer: &Offer) -> bool {
        self.generator.satisfies_all_constraints(offer)
    }

    fn accepts(&self, offer: &Offer) -> bool {
        self.accepts_all || self.generator.accepts(offer)
    }

    fn can_continue(&self) -> bool {
        self.generator.is_active()
    }
}
