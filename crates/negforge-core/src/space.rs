//! The negotiation space: issues and their candidate values.

use std::collections::HashSet;

use crate::atom::{Atom, ATOM_SEPARATOR};
use crate::error::{NegForgeError, Result};
use crate::value::Value;

/// A negotiable dimension with a finite ordered set of candidate values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    pub name: String,
    pub values: Vec<Value>,
}

impl Issue {
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mapping from issue name to its ordered candidate values.
///
/// Issue order is preserved; it defines the dimension order of generator
/// index vectors. The space is validated once at construction, so atoms are
/// guaranteed to be collision free afterwards.
///
/// # Example
///
/// ```
/// use negforge_core::NegotiationSpace;
///
/// let space = NegotiationSpace::builder()
///     .issue("boolean", [true, false])
///     .issue("integer", 0..10)
///     .build()
///     .unwrap();
///
/// assert_eq!(space.issue_count(), 2);
/// assert_eq!(space.size(), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationSpace {
    issues: Vec<Issue>,
}

impl NegotiationSpace {
    /// Creates a validated space from a list of issues.
    pub fn new(issues: Vec<Issue>) -> Result<Self> {
        if issues.is_empty() {
            return Err(NegForgeError::InvalidSpace(
                "negotiation space has no issues".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for issue in &issues {
            if issue.name.is_empty() {
                return Err(NegForgeError::InvalidSpace("empty issue name".to_string()));
            }
            if issue.name.contains(ATOM_SEPARATOR) {
                return Err(NegForgeError::InvalidSpace(format!(
                    "issue name '{}' contains the atom separator '{}'",
                    issue.name, ATOM_SEPARATOR
                )));
            }
            if !names.insert(issue.name.as_str()) {
                return Err(NegForgeError::InvalidSpace(format!(
                    "issue '{}' listed twice",
                    issue.name
                )));
            }
            if issue.values.is_empty() {
                return Err(NegForgeError::InvalidSpace(format!(
                    "issue '{}' has no values",
                    issue.name
                )));
            }

            let mut tokens = HashSet::new();
            for value in &issue.values {
                if !tokens.insert(value.token()) {
                    return Err(NegForgeError::InvalidSpace(format!(
                        "issue '{}' has two values with token '{}'",
                        issue.name,
                        value.token()
                    )));
                }
            }
        }

        Ok(Self { issues })
    }

    /// Starts building a space issue by issue.
    pub fn builder() -> NegotiationSpaceBuilder {
        NegotiationSpaceBuilder::default()
    }

    /// Returns the issues in dimension order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Iterates over issue names in dimension order.
    pub fn issue_names(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|i| i.name.as_str())
    }

    #[inline]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Returns the dimension index of an issue.
    pub fn issue_index(&self, issue: &str) -> Option<usize> {
        self.issues.iter().position(|i| i.name == issue)
    }

    /// Returns the candidate values of an issue.
    pub fn values(&self, issue: &str) -> Option<&[Value]> {
        self.issues
            .iter()
            .find(|i| i.name == issue)
            .map(|i| i.values.as_slice())
    }

    /// Returns the number of candidate values of an issue.
    pub fn cardinality(&self, issue: &str) -> Option<usize> {
        self.values(issue).map(<[Value]>::len)
    }

    /// Returns the position of a value within its issue.
    pub fn value_position(&self, issue: &str, value: &Value) -> Option<usize> {
        self.values(issue)?.iter().position(|v| v == value)
    }

    /// Number of distinct offers in the space (saturating product of cardinalities).
    pub fn size(&self) -> usize {
        self.issues
            .iter()
            .fold(1usize, |acc, i| acc.saturating_mul(i.values.len()))
    }

    /// Builds the atom for an issue/value pair, checking membership.
    pub fn atom(&self, issue: &str, value: impl Into<Value>) -> Result<Atom> {
        let value = value.into();
        let values = self
            .values(issue)
            .ok_or_else(|| NegForgeError::UnknownIssue(issue.to_string()))?;
        if !values.contains(&value) {
            return Err(NegForgeError::UnknownAtom(format!(
                "{}{}{}",
                issue,
                ATOM_SEPARATOR,
                value.token()
            )));
        }
        Ok(Atom::new(issue, value))
    }

    /// Resolves a string atom key (`issue_token`) to a typed atom.
    ///
    /// An exact token match wins; otherwise values are matched leniently
    /// (`True` for booleans, `2` for the float `2.0`).
    pub fn resolve_atom(&self, key: &str) -> Result<Atom> {
        // Keys written as 'float_0.1' carry quotes around them.
        let trimmed = key.trim_matches('\'');
        let (issue, token) = Atom::split_key(trimmed)
            .ok_or_else(|| NegForgeError::UnknownAtom(key.to_string()))?;
        let values = self
            .values(issue)
            .ok_or_else(|| NegForgeError::UnknownAtom(key.to_string()))?;

        values
            .iter()
            .find(|v| v.token() == token)
            .or_else(|| values.iter().find(|v| v.matches_token(token)))
            .map(|v| Atom::new(issue, v.clone()))
            .ok_or_else(|| NegForgeError::UnknownAtom(key.to_string()))
    }

    /// Iterates over every atom of the space, issue by issue.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.issues.iter().flat_map(|issue| {
            issue
                .values
                .iter()
                .map(move |v| Atom::new(issue.name.clone(), v.clone()))
        })
    }
}

/// Builder for [`NegotiationSpace`].
#[derive(Debug, Default)]
pub struct NegotiationSpaceBuilder {
    issues: Vec<Issue>,
}

impl NegotiationSpaceBuilder {
    /// Appends an issue with its candidate values.
    pub fn issue<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.issues.push(Issue::new(name, values));
        self
    }

    pub fn build(self) -> Result<NegotiationSpace> {
        NegotiationSpace::new(self.issues)
    }
}
