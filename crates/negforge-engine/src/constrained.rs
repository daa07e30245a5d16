//! Constraint-aware offer generation.
//!
//! [`ConstrainedEnumGenerator`] layers hard constraints over
//! [`EnumGenerator`]. Constrained atoms are ranked with a penalty so the
//! lattice walk reaches them last; the walk itself still visits them to
//! keep expansion complete, but they are never emitted.

use std::collections::HashSet;

use negforge_config::GeneratorConfig;
use negforge_core::{
    Atom, AtomicConstraint, NegForgeError, NegotiationSpace, Offer, Result, UtilityTable, Value,
};
use negforge_scoring::Evaluator;
use tracing::{debug, info, trace};

use crate::generator::EnumGenerator;

/// Lifecycle of a constrained generator.
///
/// `Exhausted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Active,
    Exhausted,
}

/// Best-first generator that never emits an offer violating a known constraint.
///
/// Offers below the acceptance threshold are never emitted either: the first
/// such entry proves the rest of the frontier is worse, so the generator
/// reports exhaustion. With `auto_constraints` enabled, values that cannot
/// reach the threshold even in the best case are constrained away
/// automatically whenever utilities change.
///
/// # Example
///
/// ```
/// use negforge_config::GeneratorConfig;
/// use negforge_core::{AtomicConstraint, Value};
/// use negforge_engine::ConstrainedEnumGenerator;
/// use negforge_scoring::LinearEvaluator;
/// use negforge_test::squares_scenario;
///
/// // issue0: 0 1 4, issue1: 9 16 25, issue2: 36 49 64
/// let (space, utilities) = squares_scenario(3, 3);
/// let evaluator = LinearEvaluator::new(utilities.clone(), -1000.0);
/// let mut generator = ConstrainedEnumGenerator::new(
///     space,
///     utilities,
///     evaluator,
///     &GeneratorConfig::default(),
///     [AtomicConstraint::new("issue2", 2)],
/// )
/// .unwrap();
///
/// let offer = generator.generate_offer().unwrap();
/// assert_eq!(offer.chosen_value("issue2"), Some(&Value::from(1)));
/// assert!(generator.satisfies_all_constraints(&offer));
/// ```
#[derive(Debug)]
pub struct ConstrainedEnumGenerator<E> {
    base: EnumGenerator<E>,
    constraints: HashSet<AtomicConstraint>,
    // [issue][space position], true when some constraint forbids the value
    forbidden: Vec<Vec<bool>>,
    auto_constraints: bool,
    constraint_penalty: f64,
    max_utility_by_issue: Vec<f64>,
    max_util: f64,
    satisfiable: bool,
    state: GeneratorState,
}

impl<E: Evaluator> ConstrainedEnumGenerator<E> {
    /// Creates a generator with an initial constraint set.
    ///
    /// When `auto_constraints` is enabled, constraint discovery runs once
    /// before the generator is returned.
    pub fn new(
        space: NegotiationSpace,
        utilities: UtilityTable,
        evaluator: E,
        config: &GeneratorConfig,
        initial_constraints: impl IntoIterator<Item = AtomicConstraint>,
    ) -> Result<Self> {
        let base = EnumGenerator::new(space, utilities, evaluator, config)?;
        let issue_count = base.space().issue_count();
        let forbidden = base
            .space()
            .issues()
            .iter()
            .map(|issue| vec![false; issue.values.len()])
            .collect();

        let mut generator = Self {
            base,
            constraints: HashSet::new(),
            forbidden,
            auto_constraints: config.auto_constraints,
            constraint_penalty: config.constraint_penalty,
            max_utility_by_issue: vec![0.0; issue_count],
            max_util: 0.0,
            satisfiable: true,
            state: GeneratorState::Active,
        };

        // Constraints the evaluator already knows about count as initial ones
        let mut initial: Vec<AtomicConstraint> =
            generator.base.evaluator().constraints().iter().cloned().collect();
        initial.extend(initial_constraints);
        if !generator.register(initial) {
            generator.refresh();
        }
        if generator.auto_constraints {
            generator.run_discovery();
        }

        Ok(generator)
    }

    /// Produces the best not-yet-emitted offer that satisfies every constraint.
    ///
    /// Returns [`NegForgeError::Exhausted`] when no acceptable offer remains,
    /// and [`NegForgeError::InternalInvariant`] if a constraint-violating
    /// offer slips through the filters.
    pub fn generate_offer(&mut self) -> Result<Offer> {
        if self.state == GeneratorState::Exhausted {
            return Err(NegForgeError::Exhausted);
        }

        let threshold = self.base.acceptance_threshold();
        while let Some(entry) = self.base.pop_expanded() {
            if entry.utility() < threshold {
                self.base.drain();
                return Err(self.exhaust("below_threshold"));
            }
            if self.base.is_generated(entry.indices()) {
                trace!(event = "skip", reason = "generated", utility = entry.utility());
                continue;
            }
            if self.base.touches_penalty(entry.indices()) {
                trace!(event = "skip", reason = "constrained", utility = entry.utility());
                continue;
            }

            let offer = self.base.decode(entry.indices());
            if !self.satisfies_all_constraints(&offer)
                || !self.base.evaluator().satisfies_all_constraints(&offer)
            {
                let violated = self
                    .find_violated_constraint(&offer)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "evaluator constraint".to_string());
                return Err(NegForgeError::InternalInvariant(format!(
                    "generated offer {} violates {}",
                    offer, violated
                )));
            }

            self.base.mark_generated(entry.indices());
            trace!(event = "offer", utility = entry.utility(), offer = %offer);
            return Ok(offer);
        }

        Err(self.exhaust("frontier_empty"))
    }

    /// Adds one constraint. Returns whether the constraint set is still satisfiable.
    pub fn add_constraint(&mut self, constraint: AtomicConstraint) -> bool {
        self.add_constraints([constraint])
    }

    /// Adds constraints. Returns whether the constraint set is still satisfiable.
    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = AtomicConstraint>) -> bool {
        self.register(constraints);
        self.satisfiable
    }

    /// Merges utilities and re-runs discovery. Returns satisfiability.
    pub fn add_utilities(&mut self, utilities: &UtilityTable) -> bool {
        self.base.extend_table(utilities);
        self.after_utility_change()
    }

    /// Replaces the utility table and re-runs discovery. Returns satisfiability.
    pub fn set_utilities(&mut self, utilities: UtilityTable) -> bool {
        self.base.replace_table(utilities);
        self.after_utility_change()
    }

    /// Values whose best-case offer falls below the acceptance threshold.
    ///
    /// For an unconstrained value `v` of issue `i`, the best case is `v`'s
    /// utility plus the best unconstrained utility of every other issue.
    /// Nothing is registered; see [`Self::add_constraints`].
    pub fn discover_constraints(&self) -> HashSet<AtomicConstraint> {
        let mut discovered = HashSet::new();
        if !self.satisfiable {
            return discovered;
        }

        let threshold = self.base.acceptance_threshold();
        for (i, issue) in self.base.space().issues().iter().enumerate() {
            let others: f64 = self
                .max_utility_by_issue
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, max)| max)
                .sum();

            for (position, value) in issue.values.iter().enumerate() {
                if self.forbidden[i][position] {
                    continue;
                }
                let utility = self
                    .base
                    .utilities()
                    .get(&Atom::new(issue.name.clone(), value.clone()));
                if others + utility < threshold {
                    discovered.insert(AtomicConstraint::new(issue.name.clone(), value.clone()));
                }
            }
        }
        discovered
    }

    /// Returns a stored constraint the offer violates, if any.
    ///
    /// Issues are checked in the offer's issue order.
    pub fn find_violated_constraint(&self, offer: &Offer) -> Option<AtomicConstraint> {
        offer
            .atoms()
            .map(AtomicConstraint::from)
            .find(|candidate| self.constraints.contains(candidate))
    }

    pub fn satisfies_all_constraints(&self, offer: &Offer) -> bool {
        self.find_violated_constraint(offer).is_none()
    }

    /// True if the evaluator prices the offer at or above the threshold and
    /// it violates no constraint.
    pub fn accepts(&self, offer: &Offer) -> bool {
        self.base.accepts(offer) && self.satisfies_all_constraints(offer)
    }

    /// Values of an issue not forbidden by any constraint.
    pub fn unconstrained_values_by_issue(&self, issue: &str) -> Result<HashSet<Value>> {
        let space = self.base.space();
        let index = space
            .issue_index(issue)
            .ok_or_else(|| NegForgeError::UnknownIssue(issue.to_string()))?;

        Ok(space.issues()[index]
            .values
            .iter()
            .zip(&self.forbidden[index])
            .filter(|&(_, &forbidden)| !forbidden)
            .map(|(value, _)| value.clone())
            .collect())
    }

    pub fn constraints(&self) -> &HashSet<AtomicConstraint> {
        &self.constraints
    }

    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == GeneratorState::Active
    }

    /// Best unconstrained utility of an issue.
    pub fn max_utility(&self, issue: &str) -> Option<f64> {
        self.base
            .space()
            .issue_index(issue)
            .map(|i| self.max_utility_by_issue[i])
    }

    /// Issue name paired with its best unconstrained utility, in space order.
    pub fn max_utility_by_issue(&self) -> impl Iterator<Item = (&str, f64)> {
        self.base
            .space()
            .issue_names()
            .zip(self.max_utility_by_issue.iter().copied())
    }

    /// Upper bound on the utility of any constraint-satisfying offer.
    pub fn max_util(&self) -> f64 {
        self.max_util
    }

    /// Ranking utility of a constrained atom.
    pub fn penalty(&self) -> f64 {
        self.constraint_penalty.min(-2.0 * self.max_util.abs())
    }

    pub fn auto_constraints(&self) -> bool {
        self.auto_constraints
    }

    /// Generator-side utility of an offer; constrained atoms count with the penalty.
    pub fn offer_utility(&self, offer: &Offer) -> f64 {
        self.base.offer_utility(offer)
    }

    pub fn acceptance_threshold(&self) -> f64 {
        self.base.acceptance_threshold()
    }

    pub fn generated_count(&self) -> usize {
        self.base.generated_count()
    }

    pub fn space(&self) -> &NegotiationSpace {
        self.base.space()
    }

    pub fn utilities(&self) -> &UtilityTable {
        self.base.utilities()
    }

    pub fn evaluator(&self) -> &E {
        self.base.evaluator()
    }

    /// Stores new constraints and mirrors them to the evaluator.
    ///
    /// Returns true if anything was added, in which case the maxima and the
    /// frontier have been refreshed.
    fn register(&mut self, constraints: impl IntoIterator<Item = AtomicConstraint>) -> bool {
        let mut added = 0u64;
        for constraint in constraints {
            if self.constraints.insert(constraint.clone()) {
                // Constraints outside the space are kept but forbid nothing
                let space = self.base.space();
                if let (Some(i), Some(position)) = (
                    space.issue_index(constraint.issue()),
                    space.value_position(constraint.issue(), constraint.value()),
                ) {
                    self.forbidden[i][position] = true;
                }
                self.base.evaluator_mut().add_constraint(constraint);
                added += 1;
            }
        }
        if added == 0 {
            return false;
        }

        self.refresh();
        debug!(
            event = "constraints_applied",
            added = added,
            constraint_count = self.constraints.len() as u64,
            satisfiable = self.satisfiable,
            max_util = self.max_util,
        );
        true
    }

    fn after_utility_change(&mut self) -> bool {
        self.refresh();
        if self.auto_constraints {
            self.run_discovery();
        }
        self.satisfiable
    }

    /// Discovers and applies constraints until nothing new is found.
    fn run_discovery(&mut self) {
        loop {
            let discovered = self.discover_constraints();
            if discovered.is_empty() {
                return;
            }
            debug!(event = "constraints_discovered", discovered = discovered.len() as u64);
            self.register(discovered);
            if !self.satisfiable {
                return;
            }
        }
    }

    /// Recomputes the maxima, reinstalls the penalty overlay and re-evaluates the state.
    fn refresh(&mut self) {
        if self.index_max_utilities() {
            let penalized: HashSet<Atom> = self.constraints.iter().map(|c| c.atom()).collect();
            let penalty = self.penalty();
            self.base.set_penalty_overlay(penalized, penalty);
        }
        self.update_state();
    }

    /// Recomputes the best unconstrained utility of every issue.
    ///
    /// Returns false, and marks the generator unsatisfiable, as soon as one
    /// issue has no unconstrained value left.
    fn index_max_utilities(&mut self) -> bool {
        let mut maxima = Vec::with_capacity(self.max_utility_by_issue.len());
        for (issue, forbidden) in self.base.space().issues().iter().zip(&self.forbidden) {
            let best = issue
                .values
                .iter()
                .zip(forbidden)
                .filter(|&(_, &forbidden)| !forbidden)
                .map(|(value, _)| {
                    self.base
                        .utilities()
                        .get(&Atom::new(issue.name.clone(), value.clone()))
                })
                .fold(None, |best: Option<f64>, u| Some(best.map_or(u, |b| b.max(u))));

            match best {
                Some(best) => maxima.push(best),
                None => {
                    debug!(event = "unsatisfiable", issue = %issue.name);
                    self.satisfiable = false;
                    return false;
                }
            }
        }

        self.max_util = maxima.iter().sum();
        self.max_utility_by_issue = maxima;
        true
    }

    fn update_state(&mut self) {
        if self.state == GeneratorState::Exhausted {
            return;
        }
        if !self.satisfiable {
            self.exhaust("unsatisfiable");
        } else if self.max_util < self.base.acceptance_threshold() {
            self.exhaust("below_threshold");
        }
    }

    fn exhaust(&mut self, reason: &'static str) -> NegForgeError {
        if self.state != GeneratorState::Exhausted {
            self.state = GeneratorState::Exhausted;
            info!(
                event = "exhausted",
                generated = self.base.generated_count() as u64,
                reason = reason,
            );
        }
        NegForgeError::Exhausted
    }
}

#[cfg(test)]
#[path = "constrained_tests.rs"]
mod tests;
