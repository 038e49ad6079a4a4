//! Error type shared by every component of the crate.
//!
//! Only configuration and contract failures are errors. A candidate that an
//! archive declines to keep is a normal outcome reported through the `bool`
//! returned by `add`, never through [`ParetoError`].

use thiserror::Error;

/// Errors raised by archive construction and population operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParetoError {
    /// `divisions ^ objectives` does not fit the grid's cell index type.
    #[error(
        "number of divisions ({divisions}) too large for adaptive grid archive \
         with {objectives} objectives; at most {max_bisections} bisections are supported"
    )]
    GridTooLarge {
        divisions: u32,
        objectives: usize,
        max_bisections: u32,
    },

    /// The archive capacity was zero.
    #[error("capacity must be at least 1")]
    InvalidCapacity,

    /// The number of grid divisions per objective was zero.
    #[error("number of divisions must be at least 1")]
    InvalidDivisions,

    /// A component was configured for zero objectives.
    #[error("number of objectives must be at least 1")]
    NoObjectives,

    /// An ε value was not strictly positive and finite.
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    /// No ε values were supplied.
    #[error("at least one epsilon value is required")]
    EmptyEpsilons,

    /// Index-based replacement would bypass the dominance check.
    #[error("replace is not supported by non-dominated populations; remove and add instead")]
    ReplaceUnsupported,

    /// An index was past the end of the population.
    #[error("index {index} out of bounds for population of size {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Bounds were requested from a population with no members.
    #[error("population must contain at least one solution to compute bounds")]
    EmptyPopulation,

    /// A solution's objective count differs from what the component expects.
    #[error("expected {expected} objectives, got {actual}")]
    ObjectiveCountMismatch { expected: usize, actual: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ParetoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_too_large_message() {
        let err = ParetoError::GridTooLarge {
            divisions: 1 << 20,
            objectives: 3,
            max_bisections: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("1048576"));
        assert!(msg.contains("3 objectives"));
        assert!(msg.contains("10 bisections"));
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = ParetoError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds for population of size 2");
    }
}
