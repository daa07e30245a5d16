//! Priority frontier for best-first offer enumeration.
//!
//! Each entry is an index vector into the per-issue utility rankings. The
//! frontier pops the highest-utility entry first; entries of equal utility
//! are ordered by a tie-break token and finally by insertion sequence, so
//! the order is total and never depends on the wall clock.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;

use negforge_config::{GeneratorConfig, TieBreak};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

/// Index vector: component `i` indexes issue `i`'s ranking.
pub type IndexVector = SmallVec<[usize; 8]>;

/// A unit of the priority frontier.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    utility: f64,
    tie_break: u64,
    sequence: u64,
    indices: IndexVector,
}

impl FrontierEntry {
    #[inline]
    pub fn utility(&self) -> f64 {
        self.utility
    }

    #[inline]
    pub fn tie_break(&self) -> u64 {
        self.tie_break
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher utility = higher priority, then lower token, then earlier push
        self.utility
            .total_cmp(&other.utility)
            .then_with(|| other.tie_break.cmp(&self.tie_break))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Source of tie-break tokens.
enum TieBreaker {
    Insertion,
    Random(StdRng),
}

impl TieBreaker {
    fn token(&mut self, sequence: u64) -> u64 {
        match self {
            TieBreaker::Insertion => sequence,
            TieBreaker::Random(rng) => rng.random(),
        }
    }
}

impl Debug for TieBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreaker::Insertion => write!(f, "Insertion"),
            TieBreaker::Random(_) => write!(f, "Random"),
        }
    }
}

/// Max-priority frontier with membership tracking.
///
/// An index vector is accepted at most once between two [`Frontier::clear`]
/// calls, so lattice expansion never queues the same combination twice.
///
/// # Example
///
/// ```
/// use negforge_engine::frontier::Frontier;
/// use smallvec::smallvec;
///
/// let mut frontier = Frontier::insertion_ordered();
/// assert!(frontier.push(smallvec![0, 1], 10.0));
/// assert!(frontier.push(smallvec![1, 0], 10.0));
/// assert!(frontier.push(smallvec![0, 0], 20.0));
/// assert!(!frontier.push(smallvec![0, 1], 10.0));
///
/// assert_eq!(frontier.pop().unwrap().indices(), &[0, 0]);
/// assert_eq!(frontier.pop().unwrap().indices(), &[0, 1]);
/// assert_eq!(frontier.pop().unwrap().indices(), &[1, 0]);
/// assert!(frontier.pop().is_none());
/// ```
#[derive(Debug)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    seen: HashSet<IndexVector>,
    tie_breaker: TieBreaker,
    sequence: u64,
}

impl Frontier {
    /// Creates a frontier that breaks ties by insertion order.
    pub fn insertion_ordered() -> Self {
        Self::with_tie_breaker(TieBreaker::Insertion)
    }

    /// Creates a frontier that breaks ties with seeded random tokens.
    pub fn seeded(seed: u64) -> Self {
        Self::with_tie_breaker(TieBreaker::Random(StdRng::seed_from_u64(seed)))
    }

    /// Creates a frontier that breaks ties with OS-seeded random tokens.
    pub fn randomized() -> Self {
        Self::with_tie_breaker(TieBreaker::Random(StdRng::from_os_rng()))
    }

    /// Creates a frontier following the configured tie-break policy.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        match (config.tie_break, config.random_seed) {
            (TieBreak::Insertion, _) => Self::insertion_ordered(),
            (TieBreak::Random, Some(seed)) => Self::seeded(seed),
            (TieBreak::Random, None) => Self::randomized(),
        }
    }

    fn with_tie_breaker(tie_breaker: TieBreaker) -> Self {
        Self {
            heap: BinaryHeap::new(),
            seen: HashSet::new(),
            tie_breaker,
            sequence: 0,
        }
    }

    /// Queues an index vector unless it was queued before.
    ///
    /// Returns false if the vector had already been seen.
    pub fn push(&mut self, indices: IndexVector, utility: f64) -> bool {
        if !self.seen.insert(indices.clone()) {
            return false;
        }
        let sequence = self.sequence;
        self.sequence += 1;
        let tie_break = self.tie_breaker.token(sequence);
        self.heap.push(FrontierEntry {
            utility,
            tie_break,
            sequence,
            indices,
        });
        true
    }

    /// Removes and returns the highest-priority entry.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Returns the highest-priority entry without removing it.
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek()
    }

    /// Drops all queued entries and forgets which vectors were seen.
    ///
    /// The tie-break source keeps its state.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seen.clear();
    }

    /// Drops queued entries but keeps the seen set, so nothing is re-queued.
    pub fn drain(&mut self) {
        self.heap.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of distinct vectors accepted since the last clear.
    #[inline]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
