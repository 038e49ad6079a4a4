//! Decision variables carried by a [`Solution`](super::Solution).
//!
//! The archiving engine never interprets variables except to measure
//! decision-space distance for
//! [`DuplicateMode::AllowDuplicateObjectives`](crate::archive::DuplicateMode).

/// A single decision variable.
///
/// # Examples
///
/// ```
/// use u_pareto::solution::Variable;
///
/// let a = Variable::Binary(vec![true, false, true]);
/// let b = Variable::Binary(vec![true, true, false]);
/// assert_eq!(a.distance(&b), 2.0); // Hamming distance
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variable {
    /// A real-valued variable.
    Real(f64),

    /// An integer-valued variable.
    Integer(i64),

    /// A fixed-length bit string.
    Binary(Vec<bool>),

    /// A permutation of `0..n`.
    Permutation(Vec<usize>),
}

impl Variable {
    /// Distance between two variables in decision space.
    ///
    /// - `Real`/`Integer`: squared difference
    /// - `Binary`: Hamming distance
    /// - `Permutation`: sum over elements of the displacement between their
    ///   positions in the two permutations
    /// - mismatched kinds or lengths: `1.0`
    pub fn distance(&self, other: &Variable) -> f64 {
        match (self, other) {
            (Variable::Real(a), Variable::Real(b)) => (a - b).powi(2),
            (Variable::Integer(a), Variable::Integer(b)) => ((a - b) as f64).powi(2),
            (Variable::Binary(a), Variable::Binary(b)) if a.len() == b.len() => {
                a.iter().zip(b).filter(|(x, y)| x != y).count() as f64
            }
            (Variable::Permutation(a), Variable::Permutation(b)) if a.len() == b.len() => {
                let mut position = vec![usize::MAX; b.len()];
                for (k, &element) in b.iter().enumerate() {
                    if element < position.len() {
                        position[element] = k;
                    }
                }

                let mut distance = 0.0;
                for (j, &element) in a.iter().enumerate() {
                    match position.get(element) {
                        Some(&k) if k != usize::MAX => distance += k.abs_diff(j) as f64,
                        _ => return 1.0,
                    }
                }
                distance
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_distance() {
        let d = Variable::Real(1.5).distance(&Variable::Real(-0.5));
        assert!((d - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_integer_distance() {
        assert_eq!(Variable::Integer(3).distance(&Variable::Integer(6)), 9.0);
    }

    #[test]
    fn test_binary_identical() {
        let a = Variable::Binary(vec![true, false]);
        assert_eq!(a.distance(&a.clone()), 0.0);
    }

    #[test]
    fn test_permutation_distance() {
        let a = Variable::Permutation(vec![0, 1, 2]);
        let b = Variable::Permutation(vec![2, 1, 0]);
        // 0 moves 2 places, 1 stays, 2 moves 2 places
        assert_eq!(a.distance(&b), 4.0);
        assert_eq!(a.distance(&a.clone()), 0.0);
    }

    #[test]
    fn test_mismatched_kinds() {
        assert_eq!(Variable::Real(0.0).distance(&Variable::Integer(0)), 1.0);
        assert_eq!(
            Variable::Binary(vec![true]).distance(&Variable::Binary(vec![true, false])),
            1.0
        );
    }
}
