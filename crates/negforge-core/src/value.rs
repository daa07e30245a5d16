//! Issue values.
//!
//! Candidate values of an issue may be booleans, integers, floats or strings.
//! The negotiation engine treats them as opaque tokens: equality, hashing and
//! the canonical [`Value::token`] form are all that matter for utility and
//! constraint lookup.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A candidate value of an issue.
///
/// # Example
///
/// ```
/// use negforge_core::Value;
///
/// assert_eq!(Value::from(true).token(), "true");
/// assert_eq!(Value::from(9).token(), "9");
/// assert_eq!(Value::from(0.1).token(), "0.1");
/// assert_eq!(Value::from("high").token(), "high");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns the canonical string form used in atom keys.
    pub fn token(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            // Debug keeps the fractional part ("1.0"), so floats never read as ints.
            Value::Float(f) => format!("{:?}", f),
            Value::Str(s) => s.clone(),
        }
    }

    /// Returns true if `token` is this value's canonical form.
    ///
    /// Booleans also match their capitalized spelling (`True`/`False`).
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            Value::Bool(b) => token.eq_ignore_ascii_case(if *b { "true" } else { "false" }),
            Value::Float(f) => {
                self.token() == token || token.parse::<f64>().map(|t| t == *f).unwrap_or(false)
            }
            _ => self.token() == token,
        }
    }

    fn discriminant(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Str(_) => 3,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
