//! Error types for NegForge

use thiserror::Error;

/// Main error type for NegForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NegForgeError {
    /// No further offer can be produced.
    ///
    /// Either the frontier ran dry or the constraint set forbids every value
    /// of some issue. Callers treat this as "stop negotiating".
    #[error("No more offers can be generated")]
    Exhausted,

    /// An offer's weight mapping does not select exactly one value for an issue
    #[error("Malformed offer: issue '{issue}' has {chosen} chosen values, expected exactly one")]
    MalformedOffer { issue: String, chosen: usize },

    /// A generator emitted an offer that violates a stored constraint
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The negotiation space failed validation
    #[error("Invalid negotiation space: {0}")]
    InvalidSpace(String),

    /// An issue name is not part of the negotiation space
    #[error("Unknown issue: {0}")]
    UnknownIssue(String),

    /// An atom key does not resolve to an issue/value pair of the space
    #[error("Unknown atom: {0}")]
    UnknownAtom(String),

    /// Error in generator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NegForgeError {
    /// Returns true for the recoverable "no more offers" signal.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, NegForgeError::Exhausted)
    }
}

/// Result type alias for NegForge operations
pub type Result<T> = std::result::Result<T, NegForgeError>;
