//! Offers: one chosen value per issue.

use std::collections::BTreeMap;
use std::fmt;

use crate::atom::Atom;
use crate::error::{NegForgeError, Result};
use crate::space::NegotiationSpace;
use crate::value::Value;

/// Per-issue value weights, the one-hot form of an offer.
pub type OfferWeights = BTreeMap<String, Vec<(Value, f64)>>;

/// An immutable full assignment of one value per issue.
///
/// Offers compare and hash by their chosen values only, so two weight
/// mappings that select the same values produce equal offers.
///
/// # Example
///
/// ```
/// use negforge_core::{Offer, Value};
///
/// let offer = Offer::from_weights([
///     ("boolean", vec![(Value::from(true), 1.0), (Value::from(false), 0.0)]),
///     ("integer", vec![(Value::from(3), 0.0), (Value::from(9), 1.0)]),
/// ])
/// .unwrap();
///
/// assert_eq!(offer.chosen_value("integer"), Some(&Value::Int(9)));
/// assert_eq!(offer, Offer::new([("boolean", Value::from(true)), ("integer", Value::from(9))]));
/// assert_eq!(offer.to_string(), "[boolean->true, integer->9]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    choices: BTreeMap<String, Value>,
}

impl Offer {
    /// Creates an offer from explicit issue → value choices.
    pub fn new<S, V>(choices: impl IntoIterator<Item = (S, V)>) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            choices: choices
                .into_iter()
                .map(|(issue, value)| (issue.into(), value.into()))
                .collect(),
        }
    }

    /// Creates an offer from a per-issue weight mapping.
    ///
    /// # Errors
    ///
    /// Returns [`NegForgeError::MalformedOffer`] when an issue has no value
    /// or more than one value with a nonzero weight, or appears twice.
    pub fn from_weights<S, W, V>(weights: impl IntoIterator<Item = (S, W)>) -> Result<Self>
    where
        S: Into<String>,
        W: IntoIterator<Item = (V, f64)>,
        V: Into<Value>,
    {
        let mut choices = BTreeMap::new();
        for (issue, values) in weights {
            let issue = issue.into();
            let chosen: Vec<Value> = values
                .into_iter()
                .filter(|(_, weight)| *weight != 0.0)
                .map(|(value, _)| value.into())
                .collect();

            if chosen.len() != 1 {
                return Err(NegForgeError::MalformedOffer {
                    issue,
                    chosen: chosen.len(),
                });
            }
            if let Some(value) = chosen.into_iter().next() {
                // A repeated issue selects a second value for it
                if choices.insert(issue.clone(), value).is_some() {
                    return Err(NegForgeError::MalformedOffer { issue, chosen: 2 });
                }
            }
        }
        Ok(Self { choices })
    }

    /// Iterates over the issues of this offer in name order.
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.choices.keys().map(String::as_str)
    }

    /// Returns the chosen value of an issue.
    pub fn chosen_value(&self, issue: &str) -> Option<&Value> {
        self.choices.get(issue)
    }

    /// Iterates over the atoms selected by this offer.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.choices
            .iter()
            .map(|(issue, value)| Atom::new(issue.clone(), value.clone()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Reproduces the one-hot weight mapping over the full space.
    pub fn one_hot(&self, space: &NegotiationSpace) -> OfferWeights {
        space
            .issues()
            .iter()
            .map(|issue| {
                let chosen = self.choices.get(&issue.name);
                let weights = issue
                    .values
                    .iter()
                    .map(|v| (v.clone(), if Some(v) == chosen { 1.0 } else { 0.0 }))
                    .collect();
                (issue.name.clone(), weights)
            })
            .collect()
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (issue, value)) in self.choices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}->{}", issue, value)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_weights() {
        let a = Offer::from_weights([("x", vec![(Value::from(1), 1.0), (Value::from(2), 0.0)])]).unwrap();
        let b = Offer::from_weights([("x", vec![(Value::from(2), 0.0), (Value::from(1), 1.0)])]).unwrap();
        let c = Offer::from_weights([("x", vec![(Value::from(1), 1.0)])]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);

        let set: HashSet<Offer> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_no_chosen_value_is_malformed() {
        let err = Offer::from_weights([("x", vec![(Value::from(1), 0.0), (Value::from(2), 0.0)])])
            .unwrap_err();
        assert_eq!(
            err,
            NegForgeError::MalformedOffer {
                issue: "x".to_string(),
                chosen: 0
            }
        );
    }

    #[test]
    fn test_multiple_chosen_values_is_malformed() {
        let err = Offer::from_weights([("x", vec![(Value::from(1), 1.0), (Value::from(2), 1.0)])])
            .unwrap_err();
        assert!(matches!(err, NegForgeError::MalformedOffer { chosen: 2, .. }));
    }

    #[test]
    fn test_repeated_issue_is_malformed() {
        let err = Offer::from_weights([
            ("x", vec![(Value::from(1), 1.0), (Value::from(2), 0.0)]),
            ("x", vec![(Value::from(1), 0.0), (Value::from(2), 1.0)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            NegForgeError::MalformedOffer {
                issue: "x".to_string(),
                chosen: 2
            }
        );
    }

    #[test]
    fn test_one_hot() {
        let space = NegotiationSpace::builder()
            .issue("x", [1, 2, 3])
            .issue("y", ["a", "b"])
            .build()
            .unwrap();
        let offer = Offer::new([("x", Value::from(2)), ("y", Value::from("a"))]);
        let weights = offer.one_hot(&space);

        assert_eq!(
            weights["x"],
            vec![(Value::from(1), 0.0), (Value::from(2), 1.0), (Value::from(3), 0.0)]
        );
        assert_eq!(Offer::from_weights(weights).unwrap(), offer);
    }

    #[test]
    fn test_display() {
        let offer = Offer::new([
            ("first", Value::from(true)),
            ("second", Value::from(-3)),
            ("third", Value::from(1.8)),
        ]);
        assert_eq!(offer.to_string(), "[first->true, second->-3, third->1.8]");
    }
}
