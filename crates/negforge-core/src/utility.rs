//! Utility tables: atom → score.

use std::collections::{BTreeMap, HashMap};

use crate::atom::Atom;
use crate::error::Result;
use crate::space::NegotiationSpace;

/// Nested utility representation: issue → value token → score.
pub type NestedUtilities = BTreeMap<String, BTreeMap<String, f64>>;

/// Mapping from atom to a real-valued score.
///
/// Atoms without an entry contribute zero to an offer's utility.
///
/// # Example
///
/// ```
/// use negforge_core::{Atom, NegotiationSpace, UtilityTable};
///
/// let space = NegotiationSpace::builder()
///     .issue("boolean", [true, false])
///     .build()
///     .unwrap();
///
/// let table = UtilityTable::from_keyed(&space, [("boolean_True", 100.0)]).unwrap();
/// assert_eq!(table.get(&Atom::new("boolean", true)), 100.0);
/// assert_eq!(table.get(&Atom::new("boolean", false)), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilityTable {
    scores: HashMap<Atom, f64>,
}

impl UtilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from string atom keys, resolving them against the space.
    pub fn from_keyed<'a>(
        space: &NegotiationSpace,
        entries: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self> {
        let mut table = Self::new();
        for (key, score) in entries {
            table.insert(space.resolve_atom(key)?, score);
        }
        Ok(table)
    }

    /// Builds a table from the nested issue → token → score form.
    pub fn from_nested(space: &NegotiationSpace, nested: &NestedUtilities) -> Result<Self> {
        let mut table = Self::new();
        for (issue, values) in nested {
            for (token, score) in values {
                let atom = space.resolve_atom(&format!("{}_{}", issue, token))?;
                table.insert(atom, *score);
            }
        }
        Ok(table)
    }

    /// Returns the score of an atom, zero when unspecified.
    #[inline]
    pub fn get(&self, atom: &Atom) -> f64 {
        self.scores.get(atom).copied().unwrap_or(0.0)
    }

    /// Returns the score of an atom only if it has an entry.
    pub fn get_explicit(&self, atom: &Atom) -> Option<f64> {
        self.scores.get(atom).copied()
    }

    pub fn insert(&mut self, atom: Atom, score: f64) -> Option<f64> {
        self.scores.insert(atom, score)
    }

    /// Merges another table into this one; entries of `other` win.
    pub fn extend(&mut self, other: &UtilityTable) {
        self.scores
            .extend(other.scores.iter().map(|(a, s)| (a.clone(), *s)));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &f64)> {
        self.scores.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the nested issue → token → score form.
    pub fn nested(&self) -> NestedUtilities {
        let mut nested = NestedUtilities::new();
        for (atom, score) in &self.scores {
            nested
                .entry(atom.issue.clone())
                .or_default()
                .insert(atom.value.token(), *score);
        }
        nested
    }
}

impl FromIterator<(Atom, f64)> for UtilityTable {
    fn from_iter<T: IntoIterator<Item = (Atom, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UtilityTable {
    type Item = (&'a Atom, &'a f64);
    type IntoIter = std::collections::hash_map::Iter<'a, Atom, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}
