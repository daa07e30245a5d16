//! Grid scenarios built from utility matrices.
//!
//! Row `i` of the matrix becomes issue `issue{i}`; column `j` becomes the
//! integer value `j` of that issue with utility `matrix[i][j]`.
//!
//! # Example
//!
//! ```
//! use negforge_test::squares_scenario;
//!
//! // issue0: 0 1 4, issue1: 9 16 25, issue2: 36 49 64
//! let (space, utilities) = squares_scenario(3, 3);
//! assert_eq!(space.size(), 27);
//! assert_eq!(utilities.len(), 9);
//! ```

use std::collections::HashSet;

use negforge_core::{Atom, AtomicConstraint, Issue, NegotiationSpace, UtilityTable};

/// Builds a scenario from a utility matrix (one row per issue).
///
/// # Panics
///
/// Panics if the matrix is empty or has an empty row.
pub fn matrix_scenario(matrix: &[Vec<f64>]) -> (NegotiationSpace, UtilityTable) {
    let mut issues = Vec::with_capacity(matrix.len());
    let mut utilities = UtilityTable::new();

    for (i, row) in matrix.iter().enumerate() {
        let name = format!("issue{}", i);
        issues.push(Issue::new(name.clone(), (0..row.len()).map(|j| j as i64)));
        for (j, score) in row.iter().enumerate() {
            utilities.insert(Atom::new(name.clone(), j as i64), *score);
        }
    }

    let space = NegotiationSpace::new(issues).expect("utility matrix must not be empty");
    (space, utilities)
}

/// Scenario whose utilities are `k²` for `k = 0..issues·values` laid out row by row.
pub fn squares_scenario(issues: usize, values: usize) -> (NegotiationSpace, UtilityTable) {
    let matrix: Vec<Vec<f64>> = (0..issues)
        .map(|i| {
            (0..values)
                .map(|j| {
                    let k = (i * values + j) as f64;
                    k * k
                })
                .collect()
        })
        .collect();
    matrix_scenario(&matrix)
}

/// Number of offers left in the space once the constrained values are removed.
pub fn space_size_without(
    space: &NegotiationSpace,
    constraints: &HashSet<AtomicConstraint>,
) -> usize {
    space
        .issues()
        .iter()
        .map(|issue| {
            issue
                .values
                .iter()
                .filter(|v| {
                    !constraints
                        .iter()
                        .any(|c| c.issue() == issue.name && c.value() == *v)
                })
                .count()
        })
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares_layout() {
        let (space, utilities) = squares_scenario(3, 3);
        assert_eq!(utilities.get(&Atom::new("issue0", 2)), 4.0);
        assert_eq!(utilities.get(&Atom::new("issue1", 0)), 9.0);
        assert_eq!(utilities.get(&Atom::new("issue2", 2)), 64.0);
        assert_eq!(space.issue_count(), 3);
    }

    #[test]
    fn test_space_size_without() {
        let (space, _) = squares_scenario(3, 3);
        let constraints: HashSet<AtomicConstraint> = [
            AtomicConstraint::new("issue2", 2),
            AtomicConstraint::new("issue0", 1),
        ]
        .into_iter()
        .collect();

        assert_eq!(space_size_without(&space, &HashSet::new()), 27);
        assert_eq!(space_size_without(&space, &constraints), 2 * 3 * 2);
    }
}
