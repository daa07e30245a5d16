//! Shared test fixtures for NegForge crates.
//!
//! This crate provides negotiation scenarios and pure helper functions for
//! testing. It depends only on `negforge-core` so that every other crate can
//! use it as a dev-dependency without cycles.
//!
//! - [`matrix`] - Grid scenarios built from utility matrices
//! - [`mixed`] - Boolean/integer/float scenarios with sparse utilities
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! negforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use negforge_test::{squares_scenario, mixed_scenario};
//! ```

pub mod matrix;
pub mod mixed;

// Re-export commonly used fixtures at crate root for convenience
pub use matrix::{matrix_scenario, space_size_without, squares_scenario};
pub use mixed::{example_scenario, mixed_scenario};
