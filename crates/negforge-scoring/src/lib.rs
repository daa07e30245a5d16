//! Offer evaluation for NegForge.
//!
//! This crate provides the scoring seam between offer generators and
//! concrete utility models:
//! - The `Evaluator` trait consumed by the generators
//! - `LinearEvaluator`, a weighted additive utility model

pub mod evaluator;
pub mod linear;

pub use evaluator::Evaluator;
pub use linear::LinearEvaluator;
