// Evaluator trait definition.

use std::collections::HashSet;
use std::fmt::Debug;

use negforge_core::{AtomicConstraint, Offer, UtilityTable};

// Scores offers on behalf of an offer generator.
//
// Generators depend only on this interface, never on a concrete scoring
// strategy. Implementations keep their own copy of the constraint set so
// that constraint-violating offers can be priced independently of how the
// generator ranks them.
pub trait Evaluator: Debug {
    // Returns the utility of an offer.
    fn calc_offer_utility(&self, offer: &Offer) -> f64;

    // Merges utilities into the evaluator's table; new entries win.
    fn add_utilities(&mut self, utilities: &UtilityTable);

    // Replaces the evaluator's utility table.
    fn set_utilities(&mut self, utilities: UtilityTable);

    // Registers a single constraint.
    fn add_constraint(&mut self, constraint: AtomicConstraint);

    // Registers a batch of constraints.
    fn add_constraints(&mut self, constraints: &HashSet<AtomicConstraint>) {
        for constraint in constraints {
            self.add_constraint(constraint.clone());
        }
    }

    // Returns the registered constraints.
    fn constraints(&self) -> &HashSet<AtomicConstraint>;

    // Returns true if the offer violates none of the registered constraints.
    fn satisfies_all_constraints(&self, offer: &Offer) -> bool {
        self.constraints()
            .iter()
            .all(|constraint| constraint.is_satisfied_by_offer(offer))
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn calc_offer_utility(&self, offer: &Offer) -> f64 {
        (**self).calc_offer_utility(offer)
    }

    fn add_utilities(&mut self, utilities: &UtilityTable) {
        (**self).add_utilities(utilities)
    }

    fn set_utilities(&mut self, utilities: UtilityTable) {
        (**self).set_utilities(utilities)
    }

    fn add_constraint(&mut self, constraint: AtomicConstraint) {
        (**self).add_constraint(constraint)
    }

    fn add_constraints(&mut self, constraints: &HashSet<AtomicConstraint>) {
        (**self).add_constraints(constraints)
    }

    fn constraints(&self) -> &HashSet<AtomicConstraint> {
        (**self).constraints()
    }

    fn satisfies_all_constraints(&self, offer: &Offer) -> bool {
        (**self).satisfies_all_constraints(offer)
    }
}
