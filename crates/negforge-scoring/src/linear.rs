//! Linear additive evaluator.

use std::collections::{HashMap, HashSet};

use negforge_core::{AtomicConstraint, Offer, UtilityTable};
use tracing::trace;

use crate::evaluator::Evaluator;

/// Scores an offer as the weighted sum of its atom utilities.
///
/// `utility(offer) = Σ weight(issue) · utility(issue_value)`, where issues
/// without a weight count with weight 1 and atoms without a utility count
/// as 0. Offers that violate a registered constraint are worth the
/// non-agreement cost instead.
///
/// # Example
///
/// ```
/// use negforge_core::{AtomicConstraint, Atom, Offer, UtilityTable, Value};
/// use negforge_scoring::{Evaluator, LinearEvaluator};
///
/// let utilities: UtilityTable = [
///     (Atom::new("boolean", true), 100.0),
///     (Atom::new("integer", 9), 100.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut evaluator = LinearEvaluator::new(utilities, -1000.0);
/// let offer = Offer::new([("boolean", Value::from(true)), ("integer", Value::from(9))]);
/// assert_eq!(evaluator.calc_offer_utility(&offer), 200.0);
///
/// evaluator.add_constraint(AtomicConstraint::new("boolean", true));
/// assert_eq!(evaluator.calc_offer_utility(&offer), -1000.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearEvaluator {
    utilities: UtilityTable,
    weights: HashMap<String, f64>,
    non_agreement_cost: f64,
    constraints: HashSet<AtomicConstraint>,
}

impl LinearEvaluator {
    /// Creates an evaluator with unit weights and no constraints.
    pub fn new(utilities: UtilityTable, non_agreement_cost: f64) -> Self {
        Self {
            utilities,
            weights: HashMap::new(),
            non_agreement_cost,
            constraints: HashSet::new(),
        }
    }

    /// Sets per-issue weights.
    pub fn with_weights<S: Into<String>>(mut self, weights: impl IntoIterator<Item = (S, f64)>) -> Self {
        self.weights = weights.into_iter().map(|(i, w)| (i.into(), w)).collect();
        self
    }

    /// Registers initial constraints.
    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = AtomicConstraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Returns the weight of an issue (1 when unspecified).
    pub fn weight(&self, issue: &str) -> f64 {
        self.weights.get(issue).copied().unwrap_or(1.0)
    }

    pub fn utilities(&self) -> &UtilityTable {
        &self.utilities
    }

    pub fn non_agreement_cost(&self) -> f64 {
        self.non_agreement_cost
    }
}

impl Evaluator for LinearEvaluator {
    fn calc_offer_utility(&self, offer: &Offer) -> f64 {
        if !self.satisfies_all_constraints(offer) {
            return self.non_agreement_cost;
        }

        offer
            .atoms()
            .map(|atom| self.weight(&atom.issue) * self.utilities.get(&atom))
            .sum()
    }

    fn add_utilities(&mut self, utilities: &UtilityTable) {
        self.utilities.extend(utilities);
    }

    fn set_utilities(&mut self, utilities: UtilityTable) {
        self.utilities = utilities;
    }

    fn add_constraint(&mut self, constraint: AtomicConstraint) {
        trace!(constraint = %constraint, "Evaluator registered constraint");
        self.constraints.insert(constraint);
    }

    fn constraints(&self) -> &HashSet<AtomicConstraint> {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use negforge_core::Value;
    use negforge_test::mixed_scenario;

    fn offer(boolean: bool, integer: i64, float: f64) -> Offer {
        Offer::new([
            ("boolean", Value::from(boolean)),
            ("integer", Value::from(integer)),
            ("float", Value::from(float)),
        ])
    }

    #[test]
    fn test_sum_of_atom_utilities() {
        let (_, utilities) = mixed_scenario();
        let evaluator = LinearEvaluator::new(utilities, -1000.0);

        assert_eq!(evaluator.calc_offer_utility(&offer(true, 9, 0.1)), 201.0);
        assert_eq!(evaluator.calc_offer_utility(&offer(false, 5, 0.0)), -90.0);
        assert_eq!(evaluator.calc_offer_utility(&offer(true, 3, 0.6)), 110.0);
    }

    #[test]
    fn test_weights_scale_issues() {
        let (_, utilities) = mixed_scenario();
        let evaluator = LinearEvaluator::new(utilities, -1000.0)
            .with_weights([("boolean", 0.5), ("integer", 2.0)]);

        assert_eq!(evaluator.calc_offer_utility(&offer(true, 9, 0.1)), 50.0 + 200.0 + 1.0);
    }

    #[test]
    fn test_worth_of_violating_offer_is_non_agreement_cost() {
        let (_, utilities) = mixed_scenario();
        let mut evaluator = LinearEvaluator::new(utilities, -1000.0);
        evaluator.add_constraint(AtomicConstraint::new("boolean", true));

        assert_eq!(evaluator.calc_offer_utility(&offer(true, 9, 0.1)), -1000.0);
        assert_eq!(evaluator.calc_offer_utility(&offer(false, 9, 0.1)), 111.0);
    }

    #[test]
    fn test_testing_constraint_satisfaction_doesnt_affect_stored_constraints() {
        let (_, utilities) = mixed_scenario();
        let boolean = AtomicConstraint::new("boolean", true);
        let integer = AtomicConstraint::new("integer", 2);
        let mut evaluator = LinearEvaluator::new(utilities, -1000.0);
        evaluator.add_constraints(&[boolean.clone(), integer.clone()].into_iter().collect());

        assert!(!evaluator.satisfies_all_constraints(&offer(true, 3, 0.6)));
        let expected: HashSet<AtomicConstraint> = [boolean, integer].into_iter().collect();
        assert_eq!(evaluator.constraints(), &expected);
    }

    #[test]
    fn test_add_utilities_overwrites() {
        let (space, utilities) = mixed_scenario();
        let mut evaluator = LinearEvaluator::new(utilities, -1000.0);
        let update = UtilityTable::from_keyed(&space, [("integer_9", -100.0)]).unwrap();
        evaluator.add_utilities(&update);

        assert_eq!(evaluator.calc_offer_utility(&offer(true, 9, 0.1)), 1.0);
    }

    #[test]
    fn test_set_utilities_replaces() {
        let (_, utilities) = mixed_scenario();
        let mut evaluator = LinearEvaluator::new(utilities, -1000.0);
        evaluator.set_utilities(UtilityTable::new());

        assert_eq!(evaluator.calc_offer_utility(&offer(true, 9, 0.1)), 0.0);
    }
}
