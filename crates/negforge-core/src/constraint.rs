//! Hard constraints on issue/value assignments.

use std::fmt;

use crate::atom::Atom;
use crate::offer::Offer;
use crate::value::Value;

/// A forbidden issue/value pair.
///
/// No acceptable offer may choose `value` for `issue`. Constraints are
/// created by constraint discovery or received from the opponent and are
/// never removed once registered.
///
/// # Example
///
/// ```
/// use negforge_core::{AtomicConstraint, Offer, Value};
///
/// let constraint = AtomicConstraint::new("boolean", true);
/// let offer = Offer::new([("boolean", Value::from(true)), ("integer", Value::from(9))]);
///
/// assert!(!constraint.is_satisfied_by_offer(&offer));
/// assert!(constraint.is_satisfied_by_assignment("boolean", &Value::from(false)));
/// assert_eq!(constraint.to_string(), "boolean!=true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomicConstraint {
    issue: String,
    value: Value,
}

impl AtomicConstraint {
    pub fn new(issue: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            issue: issue.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn issue(&self) -> &str {
        &self.issue
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the forbidden atom.
    pub fn atom(&self) -> Atom {
        Atom::new(self.issue.clone(), self.value.clone())
    }

    /// Returns true unless the offer chooses the forbidden value.
    pub fn is_satisfied_by_offer(&self, offer: &Offer) -> bool {
        offer.chosen_value(&self.issue) != Some(&self.value)
    }

    /// Returns false exactly when this single assignment is the forbidden one.
    pub fn is_satisfied_by_assignment(&self, issue: &str, value: &Value) -> bool {
        !(issue == self.issue && *value == self.value)
    }
}

impl From<Atom> for AtomicConstraint {
    fn from(atom: Atom) -> Self {
        Self {
            issue: atom.issue,
            value: atom.value,
        }
    }
}

impl fmt::Display for AtomicConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!={}", self.issue, self.value)
    }
}
