//! NegForge Engine - Best-first offer generation under hard constraints
//!
//! This crate provides:
//! - A priority frontier over index vectors into per-issue rankings
//! - An unconstrained lattice enumerator
//! - A constraint-aware generator with best-case pruning
//! - An engine facade for negotiation dialogue loops

pub mod constrained;
pub mod engine;
pub mod frontier;
pub mod generator;

pub use constrained::{ConstrainedEnumGenerator, GeneratorState};
pub use engine::{Engine, NegotiationEngine};
pub use frontier::{Frontier, FrontierEntry, IndexVector};
pub use generator::EnumGenerator;
