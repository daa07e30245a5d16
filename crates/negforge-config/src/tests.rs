//! Tests for generator configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        acceptance_threshold = 12.5
        constraint_penalty = -400.0
        auto_constraints = false
        non_agreement_cost = -50.0
        tie_break = "random"
        random_seed = 42
    "#;

    let config = GeneratorConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.acceptance_threshold, 12.5);
    assert_eq!(config.constraint_penalty, -400.0);
    assert!(!config.auto_constraints);
    assert_eq!(config.non_agreement_cost, -50.0);
    assert_eq!(config.tie_break, TieBreak::Random);
    assert_eq!(config.random_seed, Some(42));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        acceptance_threshold: 3.0
        tie_break: insertion
        random_seed: 42
    "#;

    let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.acceptance_threshold, 3.0);
    assert_eq!(config.tie_break, TieBreak::Insertion);
    assert_eq!(config.random_seed, Some(42));
    assert!(config.auto_constraints);
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = GeneratorConfig::from_toml_str("").unwrap();
    assert_eq!(config, GeneratorConfig::default());
    assert_eq!(config.constraint_penalty, DEFAULT_CONSTRAINT_PENALTY);
}

#[test]
fn test_positive_penalty_is_invalid() {
    let err = GeneratorConfig::from_toml_str("constraint_penalty = 10.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_tie_break_is_rejected() {
    let err = GeneratorConfig::from_toml_str(r#"tie_break = "alphabetical""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = GeneratorConfig::load("/definitely/not/here/negforge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = GeneratorConfig::new()
        .with_acceptance_threshold(10.0)
        .with_constraint_penalty(-1.0)
        .with_auto_constraints(false)
        .with_random_seed(123);

    assert_eq!(config.acceptance_threshold, 10.0);
    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.tie_break, TieBreak::Random);
    assert!(config.validate().is_ok());
}
