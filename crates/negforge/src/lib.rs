//! NegForge - Offer Generation and Constraint Propagation for Negotiation
//!
//! Proposes offers in best-first order over a discrete negotiation space,
//! never proposing what the opponent has ruled out and never going below
//! the agent's own acceptance threshold.
//!
//! # Example
//!
//! ```rust
//! use negforge::prelude::*;
//!
//! let space = NegotiationSpace::builder()
//!     .issue("boolean", [true, false])
//!     .issue("integer", 0..10)
//!     .build()
//!     .unwrap();
//! let utilities = UtilityTable::from_keyed(
//!     &space,
//!     [("boolean_true", 100.0), ("boolean_false", 10.0), ("integer_9", 100.0), ("integer_3", 10.0)],
//! )
//! .unwrap();
//!
//! let mut engine = Engine::linear(space, utilities, &GeneratorConfig::default()).unwrap();
//! let opening = engine.generate_offer().unwrap();
//! assert_eq!(opening.to_string(), "[boolean->true, integer->9]");
//!
//! // The opponent rejects integer=9 outright
//! engine.add_constraint(AtomicConstraint::new("integer", 9));
//! let next = engine.generate_offer().unwrap();
//! assert_eq!(engine.calc_offer_utility(&next), 110.0);
//! ```

pub use negforge_config::{ConfigError, GeneratorConfig, TieBreak};
pub use negforge_core::{
    Atom, AtomicConstraint, Issue, NegForgeError, NegotiationSpace, Offer, Result, UtilityTable,
    Value,
};
pub use negforge_engine::{
    ConstrainedEnumGenerator, Engine, EnumGenerator, GeneratorState, NegotiationEngine,
};
pub use negforge_scoring::{Evaluator, LinearEvaluator};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        AtomicConstraint, Engine, Evaluator, GeneratorConfig, LinearEvaluator, NegForgeError,
        NegotiationEngine, NegotiationSpace, Offer, UtilityTable, Value,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn agent(prefers_high_price: bool) -> Engine<LinearEvaluator> {
        let space = NegotiationSpace::builder()
            .issue("price", 0..5)
            .issue("extras", [true, false])
            .build()
            .unwrap();
        let utilities = (0..5)
            .map(|k| {
                let score = if prefers_high_price { k } else { 4 - k };
                (crate::Atom::new("price", k), f64::from(score * 10))
            })
            .collect();
        let config = GeneratorConfig::from_toml_str("acceptance_threshold = 20.0").unwrap();
        Engine::linear(space, utilities, &config).unwrap()
    }

    #[test]
    fn test_alternating_offers_reach_agreement() {
        let mut seller = agent(true);
        let mut buyer = agent(false);

        let mut agreement = None;
        while seller.can_continue() && buyer.can_continue() {
            let proposal = seller.generate_offer().unwrap();
            if buyer.accepts(&proposal) {
                agreement = Some(proposal);
                break;
            }
            let counter = buyer.generate_offer().unwrap();
            if seller.accepts(&counter) {
                agreement = Some(counter);
                break;
            }
        }

        let agreement = agreement.expect("agents share price 2");
        assert_eq!(agreement.chosen_value("price"), Some(&Value::Int(2)));
        assert_eq!(seller.generated_count(), 5);
    }

    #[test]
    fn test_exhaustion_ends_dialogue() {
        let mut seller = agent(true);
        let offers = std::iter::from_fn(|| seller.generate_offer().ok()).count();

        // price 2, 3 and 4 with either extras setting
        assert_eq!(offers, 6);
        assert!(!seller.can_continue());
        assert!(matches!(seller.generate_offer(), Err(NegForgeError::Exhausted)));
    }
}
