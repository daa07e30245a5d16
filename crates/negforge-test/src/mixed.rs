//! Scenarios mixing boolean, integer and float issues.

use negforge_core::{Atom, NegotiationSpace, UtilityTable};

/// Float values `0.0, 0.1, ..., 0.9`.
pub const FLOAT_VALUES: [f64; 10] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Boolean, integer (`0..10`) and float issues with sparse utilities.
///
/// | atom            | utility |
/// |-----------------|---------|
/// | `boolean_true`  | 100     |
/// | `boolean_false` | 10      |
/// | `integer_9`     | 100     |
/// | `integer_3`     | 10      |
/// | `integer_1`     | 0.1     |
/// | `integer_4`     | -10     |
/// | `integer_5`     | -100    |
/// | `float_0.1`     | 1       |
///
/// The best offer is `[boolean->true, float->0.1, integer->9]` worth 201.
pub fn mixed_scenario() -> (NegotiationSpace, UtilityTable) {
    let space = NegotiationSpace::builder()
        .issue("boolean", [true, false])
        .issue("integer", 0..10)
        .issue("float", FLOAT_VALUES)
        .build()
        .expect("mixed scenario space is valid");

    let utilities = [
        (Atom::new("boolean", true), 100.0),
        (Atom::new("boolean", false), 10.0),
        (Atom::new("integer", 9), 100.0),
        (Atom::new("integer", 3), 10.0),
        (Atom::new("integer", 1), 0.1),
        (Atom::new("integer", 4), -10.0),
        (Atom::new("integer", 5), -100.0),
        (Atom::new("float", 0.1), 1.0),
    ]
    .into_iter()
    .collect();

    (space, utilities)
}

/// Boolean and integer (`0..10`) issues.
///
/// `boolean_true: 100, boolean_false: 10, integer_9: 100, integer_3: 10`,
/// every other atom 0. The best offer is worth 200 and the two runners-up
/// are tied at 110.
pub fn example_scenario() -> (NegotiationSpace, UtilityTable) {
    let space = NegotiationSpace::builder()
        .issue("boolean", [true, false])
        .issue("integer", 0..10)
        .build()
        .expect("example scenario space is valid");

    let utilities = [
        (Atom::new("boolean", true), 100.0),
        (Atom::new("boolean", false), 10.0),
        (Atom::new("integer", 9), 100.0),
        (Atom::new("integer", 3), 10.0),
    ]
    .into_iter()
    .collect();

    (space, utilities)
}
