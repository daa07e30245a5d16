//! NegForge Core - Value types for automated bilateral negotiation
//!
//! This crate provides the fundamental abstractions for NegForge:
//! - Issue values and atoms for uniform utility/constraint lookup
//! - The negotiation space and utility tables
//! - Offers and atomic (hard) constraints

pub mod atom;
pub mod constraint;
pub mod error;
pub mod offer;
pub mod space;
pub mod utility;
pub mod value;


pub use atom::{Atom, ATOM_SEPARATOR};
pub use constraint::AtomicConstraint;
pub use error::{NegForgeError, Result};
pub use offer::{Offer, OfferWeights};
pub use space::{Issue, NegotiationSpace, NegotiationSpaceBuilder};
pub use utility::{NestedUtilities, UtilityTable};
pub use value::Value;
