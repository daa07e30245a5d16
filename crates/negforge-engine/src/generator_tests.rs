//! Tests for the unconstrained enumeration generator.

use super::*;
use negforge_core::Value;
use negforge_scoring::LinearEvaluator;
use negforge_test::{example_scenario, mixed_scenario, squares_scenario};

fn generator_for(
    (space, utilities): (NegotiationSpace, UtilityTable),
    config: &GeneratorConfig,
) -> EnumGenerator<LinearEvaluator> {
    let evaluator = LinearEvaluator::new(utilities.clone(), config.non_agreement_cost);
    EnumGenerator::new(space, utilities, evaluator, config).unwrap()
}

fn drain_all<E: Evaluator>(generator: &mut EnumGenerator<E>) -> Vec<Offer> {
    std::iter::from_fn(|| generator.generate_offer().ok()).collect()
}

#[test]
fn test_first_offer_is_best() {
    let mut generator = generator_for(example_scenario(), &GeneratorConfig::default());

    let offer = generator.generate_offer().unwrap();
    assert_eq!(offer.chosen_value("boolean"), Some(&Value::Bool(true)));
    assert_eq!(offer.chosen_value("integer"), Some(&Value::Int(9)));
    assert_eq!(generator.offer_utility(&offer), 200.0);
}

#[test]
fn test_ties_resolve_in_insertion_order() {
    let mut generator = generator_for(example_scenario(), &GeneratorConfig::default());
    generator.generate_offer().unwrap();

    let second = generator.generate_offer().unwrap();
    let third = generator.generate_offer().unwrap();
    assert_eq!(generator.offer_utility(&second), 110.0);
    assert_eq!(generator.offer_utility(&third), 110.0);
    assert_eq!(second.chosen_value("boolean"), Some(&Value::Bool(false)));
    assert_eq!(third.chosen_value("integer"), Some(&Value::Int(3)));
}

#[test]
fn test_all_offers_are_generated_in_dec_order() {
    let mut generator = generator_for(mixed_scenario(), &GeneratorConfig::default());
    let offers = drain_all(&mut generator);

    assert_eq!(offers.len(), 2 * 10 * 10);
    let unique: HashSet<&Offer> = offers.iter().collect();
    assert_eq!(unique.len(), offers.len());

    let utilities: Vec<f64> = offers.iter().map(|o| generator.offer_utility(o)).collect();
    assert!(utilities.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(utilities[0], 201.0);
}

#[test]
fn test_exhausted_after_last_offer() {
    let mut generator = generator_for(squares_scenario(2, 2), &GeneratorConfig::default());
    assert_eq!(drain_all(&mut generator).len(), 4);
    assert!(!generator.is_active());
    assert_eq!(generator.generate_offer(), Err(NegForgeError::Exhausted));
    assert_eq!(generator.generated_count(), 4);
}

#[test]
fn test_accepts_uses_threshold() {
    let config = GeneratorConfig::default().with_acceptance_threshold(150.0);
    let generator = generator_for(example_scenario(), &config);

    let best = Offer::new([("boolean", Value::from(true)), ("integer", Value::from(9))]);
    let runner_up = Offer::new([("boolean", Value::from(false)), ("integer", Value::from(9))]);
    assert!(generator.accepts(&best));
    assert!(!generator.accepts(&runner_up));
}

#[test]
fn test_utility_update_never_repeats_offers() {
    let (space, utilities) = mixed_scenario();
    let mut generator = generator_for((space.clone(), utilities), &GeneratorConfig::default());

    let mut offers: Vec<Offer> = (0..5).map(|_| generator.generate_offer().unwrap()).collect();

    let update = UtilityTable::from_keyed(&space, [("integer_0", 1000.0), ("boolean_false", 500.0)])
        .unwrap();
    generator.add_utilities(&update);

    let after = drain_all(&mut generator);
    let first_after = generator.offer_utility(&after[0]);
    assert_eq!(first_after, 1000.0 + 500.0 + 1.0);
    assert!(after
        .iter()
        .map(|o| generator.offer_utility(o))
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| w[0] >= w[1]));

    offers.extend(after);
    assert_eq!(offers.len(), space.size());
    let unique: HashSet<&Offer> = offers.iter().collect();
    assert_eq!(unique.len(), space.size());
}

#[test]
fn test_set_utilities_replaces_table_and_evaluator() {
    let (space, utilities) = example_scenario();
    let mut generator = generator_for((space.clone(), utilities), &GeneratorConfig::default());

    let replacement = UtilityTable::from_keyed(&space, [("integer_4", 7.0)]).unwrap();
    generator.set_utilities(replacement);

    let offer = generator.generate_offer().unwrap();
    assert_eq!(offer.chosen_value("integer"), Some(&Value::Int(4)));
    assert_eq!(generator.evaluator().calc_offer_utility(&offer), 7.0);
    assert_eq!(generator.utilities().len(), 1);
}

#[test]
fn test_penalty_overlay_ranks_atom_last() {
    let mut generator = generator_for(example_scenario(), &GeneratorConfig::default());
    let penalized: HashSet<Atom> = [Atom::new("integer", 9)].into_iter().collect();
    generator.set_penalty_overlay(penalized, -1000.0);

    let offer = generator.generate_offer().unwrap();
    assert_eq!(offer.chosen_value("integer"), Some(&Value::Int(3)));
    assert_eq!(generator.offer_utility(&offer), 110.0);

    let nine = Offer::new([("boolean", Value::from(true)), ("integer", Value::from(9))]);
    assert_eq!(generator.offer_utility(&nine), 100.0 - 1000.0);
    // The base table is untouched
    assert_eq!(generator.utilities().get(&Atom::new("integer", 9)), 100.0);
}

#[test]
fn test_touches_penalty_follows_ranked_positions() {
    let mut generator = generator_for(example_scenario(), &GeneratorConfig::default());
    assert!(!generator.touches_penalty(&[0, 0]));

    let penalized: HashSet<Atom> = [Atom::new("integer", 9)].into_iter().collect();
    generator.set_penalty_overlay(penalized, -1000.0);

    // integer=9 is now ranked last of the ten integer values
    assert!(!generator.touches_penalty(&[0, 0]));
    assert!(!generator.touches_penalty(&[1, 8]));
    assert!(generator.touches_penalty(&[0, 9]));
    assert!(generator.touches_penalty(&[1, 9]));
}

#[test]
fn test_frontier_len_tracks_expansion() {
    let mut generator = generator_for(example_scenario(), &GeneratorConfig::default());
    assert_eq!(generator.frontier_len(), 1);

    generator.generate_offer().unwrap();
    assert_eq!(generator.frontier_len(), 2);

    generator.set_utilities(UtilityTable::default());
    assert_eq!(generator.frontier_len(), 1);
}

#[test]
fn test_seeded_generators_agree() {
    let config = GeneratorConfig::default().with_random_seed(42);
    let mut first = generator_for(mixed_scenario(), &config);
    let mut second = generator_for(mixed_scenario(), &config);

    let a = drain_all(&mut first);
    let b = drain_all(&mut second);
    assert_eq!(a, b);
    assert_eq!(a.len(), 200);

    let utilities: Vec<f64> = a.iter().map(|o| first.offer_utility(o)).collect();
    assert!(utilities.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (space, utilities) = example_scenario();
    let evaluator = LinearEvaluator::new(utilities.clone(), -1000.0);
    let config = GeneratorConfig::default().with_constraint_penalty(5.0);

    let result = EnumGenerator::new(space, utilities, evaluator, &config);
    assert!(matches!(result, Err(NegForgeError::Config(_))));
}
