//! Best-first enumeration of offers over the negotiation lattice.
//!
//! Every issue's values are ranked by descending utility. An index vector
//! picks one ranked value per issue, so `[0, 0, ..., 0]` is the best offer
//! of an additive utility. Popping an entry and advancing each of its
//! components by one walks the lattice in non-increasing utility order.

use std::collections::HashSet;

use negforge_config::GeneratorConfig;
use negforge_core::{Atom, NegForgeError, NegotiationSpace, Offer, Result, UtilityTable};
use negforge_scoring::Evaluator;
use tracing::{debug, info, trace};

use crate::frontier::{Frontier, FrontierEntry, IndexVector};

#[derive(Debug, Clone, Copy)]
struct RankedValue {
    position: usize,
    utility: f64,
    penalized: bool,
}

/// Unconstrained best-first offer generator.
///
/// Each combination of the space is produced at most once for the lifetime
/// of the generator, in non-increasing order of the generator's own
/// utility. Utility updates re-rank the values and restart the walk; offers
/// that were already emitted are still expanded but never emitted again.
///
/// # Example
///
/// ```
/// use negforge_config::GeneratorConfig;
/// use negforge_core::{Atom, NegotiationSpace, UtilityTable, Value};
/// use negforge_engine::EnumGenerator;
/// use negforge_scoring::LinearEvaluator;
///
/// let space = NegotiationSpace::builder()
///     .issue("boolean", [true, false])
///     .issue("integer", 0..3)
///     .build()
///     .unwrap();
/// let utilities: UtilityTable = [
///     (Atom::new("boolean", true), 10.0),
///     (Atom::new("integer", 2), 5.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let evaluator = LinearEvaluator::new(utilities.clone(), -1000.0);
/// let mut generator =
///     EnumGenerator::new(space, utilities, evaluator, &GeneratorConfig::default()).unwrap();
///
/// let best = generator.generate_offer().unwrap();
/// assert_eq!(best.chosen_value("boolean"), Some(&Value::from(true)));
/// assert_eq!(best.chosen_value("integer"), Some(&Value::from(2)));
/// ```
#[derive(Debug)]
pub struct EnumGenerator<E> {
    space: NegotiationSpace,
    utilities: UtilityTable,
    evaluator: E,
    acceptance_threshold: f64,
    penalized: HashSet<Atom>,
    penalty: f64,
    rankings: Vec<Vec<RankedValue>>,
    frontier: Frontier,
    generated: HashSet<IndexVector>,
}

impl<E: Evaluator> EnumGenerator<E> {
    /// Creates a generator and seeds its frontier with the best offer.
    pub fn new(
        space: NegotiationSpace,
        utilities: UtilityTable,
        evaluator: E,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|e| NegForgeError::Config(e.to_string()))?;

        let mut generator = Self {
            space,
            utilities,
            evaluator,
            acceptance_threshold: config.acceptance_threshold,
            penalized: HashSet::new(),
            penalty: config.constraint_penalty,
            rankings: Vec::new(),
            frontier: Frontier::from_config(config),
            generated: HashSet::new(),
        };
        generator.rebuild();

        info!(
            event = "generator_created",
            issue_count = generator.space.issue_count() as u64,
            space_size = generator.space.size() as u64,
            acceptance_threshold = generator.acceptance_threshold,
        );

        Ok(generator)
    }

    /// Produces the next best offer not produced before.
    ///
    /// Returns [`NegForgeError::Exhausted`] once every combination has been
    /// emitted.
    pub fn generate_offer(&mut self) -> Result<Offer> {
        while let Some(entry) = self.pop_expanded() {
            if !self.mark_generated(entry.indices()) {
                trace!(event = "skip", reason = "generated", utility = entry.utility());
                continue;
            }
            let offer = self.decode(entry.indices());
            trace!(event = "offer", utility = entry.utility(), offer = %offer);
            return Ok(offer);
        }

        info!(
            event = "exhausted",
            generated = self.generated.len() as u64,
            reason = "frontier_empty",
        );
        Err(NegForgeError::Exhausted)
    }

    /// Returns true if the evaluator prices the offer at or above the threshold.
    pub fn accepts(&self, offer: &Offer) -> bool {
        self.evaluator.calc_offer_utility(offer) >= self.acceptance_threshold
    }

    /// Sum of the generator's own atom utilities for an offer.
    ///
    /// Penalized atoms count with the penalty instead of their utility.
    pub fn offer_utility(&self, offer: &Offer) -> f64 {
        offer.atoms().map(|atom| self.atom_utility(&atom)).sum()
    }

    /// Merges utilities (new entries win) and restarts the walk.
    pub fn add_utilities(&mut self, utilities: &UtilityTable) {
        self.extend_table(utilities);
        self.rebuild();
    }

    /// Replaces the utility table and restarts the walk.
    pub fn set_utilities(&mut self, utilities: UtilityTable) {
        self.replace_table(utilities);
        self.rebuild();
    }

    pub fn space(&self) -> &NegotiationSpace {
        &self.space
    }

    pub fn utilities(&self) -> &UtilityTable {
        &self.utilities
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn acceptance_threshold(&self) -> f64 {
        self.acceptance_threshold
    }

    /// Returns true while the frontier still holds candidates.
    pub fn is_active(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// Number of offers emitted so far.
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    /// Number of entries waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub(crate) fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    pub(crate) fn extend_table(&mut self, utilities: &UtilityTable) {
        self.utilities.extend(utilities);
        self.evaluator.add_utilities(utilities);
    }

    pub(crate) fn replace_table(&mut self, utilities: UtilityTable) {
        self.evaluator.set_utilities(utilities.clone());
        self.utilities = utilities;
    }

    /// Installs the penalty overlay and restarts the walk.
    pub(crate) fn set_penalty_overlay(&mut self, penalized: HashSet<Atom>, penalty: f64) {
        self.penalized = penalized;
        self.penalty = penalty;
        self.rebuild();
    }

    /// Pops the best entry and queues its unseen neighbours.
    pub(crate) fn pop_expanded(&mut self) -> Option<FrontierEntry> {
        let entry = self.frontier.pop()?;
        self.expand(entry.indices());
        Some(entry)
    }

    /// Returns true if any chosen value of the entry is penalized.
    pub(crate) fn touches_penalty(&self, indices: &[usize]) -> bool {
        indices
            .iter()
            .enumerate()
            .any(|(i, &rank)| self.rankings[i][rank].penalized)
    }

    pub(crate) fn is_generated(&self, indices: &[usize]) -> bool {
        self.generated.contains(&self.canonical(indices))
    }

    /// Records an entry as emitted. Returns false if it already was.
    pub(crate) fn mark_generated(&mut self, indices: &[usize]) -> bool {
        let key = self.canonical(indices);
        self.generated.insert(key)
    }

    /// Drops every queued entry.
    pub(crate) fn drain(&mut self) {
        self.frontier.drain();
    }

    pub(crate) fn decode(&self, indices: &[usize]) -> Offer {
        Offer::new(
            self.space
                .issues()
                .iter()
                .zip(indices)
                .enumerate()
                .map(|(i, (issue, &rank))| {
                    let position = self.rankings[i][rank].position;
                    (issue.name.as_str(), issue.values[position].clone())
                }),
        )
    }

    fn atom_utility(&self, atom: &Atom) -> f64 {
        if self.penalized.contains(atom) {
            self.penalty
        } else {
            self.utilities.get(atom)
        }
    }

    /// Positions of the chosen values in the space, independent of ranking.
    fn canonical(&self, indices: &[usize]) -> IndexVector {
        indices
            .iter()
            .enumerate()
            .map(|(i, &rank)| self.rankings[i][rank].position)
            .collect()
    }

    fn entry_utility(&self, indices: &[usize]) -> f64 {
        indices
            .iter()
            .enumerate()
            .map(|(i, &rank)| self.rankings[i][rank].utility)
            .sum()
    }

    fn expand(&mut self, indices: &[usize]) {
        for i in 0..indices.len() {
            if indices[i] + 1 >= self.rankings[i].len() {
                continue;
            }
            let mut neighbour = IndexVector::from_slice(indices);
            neighbour[i] += 1;
            let utility = self.entry_utility(&neighbour);
            self.frontier.push(neighbour, utility);
        }
    }

    fn rank(&mut self) {
        let mut rankings = Vec::with_capacity(self.space.issue_count());
        for issue in self.space.issues() {
            let mut ranked: Vec<RankedValue> = issue
                .values
                .iter()
                .enumerate()
                .map(|(position, value)| {
                    let atom = Atom::new(issue.name.clone(), value.clone());
                    RankedValue {
                        position,
                        utility: self.atom_utility(&atom),
                        penalized: self.penalized.contains(&atom),
                    }
                })
                .collect();
            // Stable: ties keep space order
            ranked.sort_by(|a, b| b.utility.total_cmp(&a.utility));
            rankings.push(ranked);
        }
        self.rankings = rankings;
    }

    /// Re-ranks every issue and re-seeds the frontier with the best entry.
    fn rebuild(&mut self) {
        self.rank();
        self.frontier.clear();

        let seed: IndexVector = std::iter::repeat(0).take(self.rankings.len()).collect();
        let utility = self.entry_utility(&seed);
        self.frontier.push(seed, utility);

        debug!(
            event = "frontier_rebuilt",
            seed_utility = utility,
            penalized = self.penalized.len() as u64,
            generated = self.generated.len() as u64,
        );
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
