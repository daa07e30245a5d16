//! Atoms: canonical keys for issue/value pairs.

use std::fmt;

use crate::value::Value;

/// Separator between the issue name and the value token in an atom key.
pub const ATOM_SEPARATOR: char = '_';

/// Canonical key for an issue/value pair.
///
/// Utilities and constraints are indexed by atoms so that they are uniform
/// regardless of the underlying value type.
///
/// # Example
///
/// ```
/// use negforge_core::{Atom, Value};
///
/// let atom = Atom::new("integer", 9);
/// assert_eq!(atom.key(), "integer_9");
/// assert_eq!(Atom::split_key("integer_9"), Some(("integer", "9")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    /// Issue the value belongs to.
    pub issue: String,
    /// The chosen value.
    pub value: Value,
}

impl Atom {
    /// Creates a new atom.
    pub fn new(issue: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            issue: issue.into(),
            value: value.into(),
        }
    }

    /// Returns the string key `issue_token`.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.issue, ATOM_SEPARATOR, self.value.token())
    }

    /// Splits a string key into issue name and value token.
    ///
    /// Issue names never contain the separator, so the split happens at the
    /// first occurrence; the token may contain further separators.
    pub fn split_key(key: &str) -> Option<(&str, &str)> {
        let (issue, token) = key.split_once(ATOM_SEPARATOR)?;
        if issue.is_empty() {
            return None;
        }
        Some((issue, token))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
