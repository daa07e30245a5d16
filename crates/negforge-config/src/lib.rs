//! Configuration system for NegForge.
//!
//! Load offer generator configuration from TOML or YAML files to control
//! the acceptance threshold, constraint handling and tie-breaking without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use negforge_config::{GeneratorConfig, TieBreak};
//!
//! let config = GeneratorConfig::from_toml_str(r#"
//!     acceptance_threshold = 50.0
//!     constraint_penalty = -5000.0
//!     auto_constraints = false
//!     tie_break = "random"
//!     random_seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.acceptance_threshold, 50.0);
//! assert_eq!(config.tie_break, TieBreak::Random);
//! assert!(!config.auto_constraints);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use negforge_config::GeneratorConfig;
//!
//! let config = GeneratorConfig::load("negforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert!(config.auto_constraints);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default penalty for constrained atoms.
pub const DEFAULT_CONSTRAINT_PENALTY: f64 = -1.0e6;

/// Default worth of a non-agreement.
pub const DEFAULT_NON_AGREEMENT_COST: f64 = -1000.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Offer generator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Minimum total utility for an offer to be acceptable.
    pub acceptance_threshold: f64,

    /// Utility assigned to constrained atoms when ranking values.
    ///
    /// Must be at most the most negative legitimate utility sum.
    pub constraint_penalty: f64,

    /// Whether utility updates promote hopeless values to constraints.
    pub auto_constraints: bool,

    /// Worth of an offer that violates a constraint.
    pub non_agreement_cost: f64,

    /// How offers of equal utility are ordered.
    pub tie_break: TieBreak,

    /// Random seed for reproducible tie-breaking.
    pub random_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.0,
            constraint_penalty: DEFAULT_CONSTRAINT_PENALTY,
            auto_constraints: true,
            non_agreement_cost: DEFAULT_NON_AGREEMENT_COST,
            tie_break: TieBreak::default(),
            random_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.acceptance_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "acceptance_threshold must be finite".to_string(),
            ));
        }
        if !self.constraint_penalty.is_finite() || self.constraint_penalty >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "constraint_penalty must be a finite negative number, got {}",
                self.constraint_penalty
            )));
        }
        if !self.non_agreement_cost.is_finite() {
            return Err(ConfigError::Invalid(
                "non_agreement_cost must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the acceptance threshold.
    pub fn with_acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Sets the constraint penalty.
    pub fn with_constraint_penalty(mut self, penalty: f64) -> Self {
        self.constraint_penalty = penalty;
        self
    }

    /// Enables or disables automatic constraint discovery.
    pub fn with_auto_constraints(mut self, enabled: bool) -> Self {
        self.auto_constraints = enabled;
        self
    }

    /// Sets the non-agreement cost.
    pub fn with_non_agreement_cost(mut self, cost: f64) -> Self {
        self.non_agreement_cost = cost;
        self
    }

    /// Sets the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the random seed and switches to random tie-breaking.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self.tie_break = TieBreak::Random;
        self
    }
}

/// Ordering of offers with equal utility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First pushed, first popped. Fully reproducible.
    #[default]
    Insertion,

    /// Random tokens, reproducible when a seed is configured.
    Random,
}

#[cfg(test)]
mod tests;
