//! Dominance relations between solutions.
//!
//! A [`DominanceComparator`] is chosen when an archive or sorter is built
//! and is then applied to pairs of solutions. The set of relations is
//! closed:
//!
//! - [`DominanceComparator::Pareto`]: plain Pareto dominance on objectives
//! - [`DominanceComparator::ConstraintAware`]: constraint violation first,
//!   then Pareto dominance
//! - [`DominanceComparator::EpsilonBox`]: constraint violation first, then
//!   dominance over ε-boxes with a same-box tie-break
//!
//! All comparators are stateless and `Sync`; the extra same-box flag of an
//! ε-box comparison is returned in [`Comparison`] rather than stored.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multiobjective Optimization"

mod epsilon;

pub use epsilon::{EpsilonBoxComparator, Epsilons, SameBoxTieBreak};

use crate::solution::Solution;

/// Outcome of comparing solution `a` against solution `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// `a` dominates `b`.
    Dominates,
    /// `b` dominates `a`.
    Dominated,
    /// Neither dominates the other.
    NonDominated,
}

impl Dominance {
    /// The conventional comparator sign: `-1` if `a` dominates, `+1` if `b`
    /// dominates, `0` otherwise.
    pub fn sign(self) -> i8 {
        match self {
            Dominance::Dominates => -1,
            Dominance::Dominated => 1,
            Dominance::NonDominated => 0,
        }
    }

    /// The same outcome seen from `b`'s side.
    pub fn reverse(self) -> Self {
        match self {
            Dominance::Dominates => Dominance::Dominated,
            Dominance::Dominated => Dominance::Dominates,
            Dominance::NonDominated => Dominance::NonDominated,
        }
    }

    fn from_flags(a_better_in_some: bool, b_better_in_some: bool) -> Self {
        match (a_better_in_some, b_better_in_some) {
            (true, false) => Dominance::Dominates,
            (false, true) => Dominance::Dominated,
            _ => Dominance::NonDominated,
        }
    }
}

/// Full result of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub dominance: Dominance,

    /// `true` when both solutions occupy the same ε-box and the outcome was
    /// decided by the same-box tie-break. Always `false` for non-ε-box
    /// comparators.
    pub same_box: bool,
}

impl Comparison {
    pub(crate) fn plain(dominance: Dominance) -> Self {
        Self {
            dominance,
            same_box: false,
        }
    }
}

/// Strategy deciding dominance between two solutions.
///
/// # Examples
///
/// ```
/// use u_pareto::dominance::{Dominance, DominanceComparator};
/// use u_pareto::solution::Solution;
///
/// let a = Solution::new(vec![1.0, 2.0]);
/// let b = Solution::new(vec![2.0, 2.0]);
/// let c = Solution::new(vec![0.0, 3.0]);
///
/// let pareto = DominanceComparator::Pareto;
/// assert_eq!(pareto.compare(&a, &b), Dominance::Dominates);
/// assert_eq!(pareto.compare(&b, &a), Dominance::Dominated);
/// assert_eq!(pareto.compare(&a, &c), Dominance::NonDominated);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DominanceComparator {
    /// Pareto dominance on objective values.
    #[default]
    Pareto,

    /// Aggregate constraint violation first, then Pareto dominance.
    ///
    /// A feasible solution dominates an infeasible one; between two
    /// infeasible solutions the smaller aggregate violation dominates.
    /// Equal violations fall through to Pareto dominance.
    ConstraintAware,

    /// Aggregate constraint violation first, then ε-box dominance.
    EpsilonBox(EpsilonBoxComparator),
}

impl DominanceComparator {
    /// Convenience constructor for an ε-box comparator with the default
    /// same-box tie-break.
    pub fn epsilon_box(epsilons: Epsilons) -> Self {
        DominanceComparator::EpsilonBox(EpsilonBoxComparator::new(epsilons))
    }

    /// Compares `a` against `b`.
    pub fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        self.compare_detailed(a, b).dominance
    }

    /// Compares `a` against `b`, also reporting whether an ε-box same-box
    /// tie-break decided the outcome.
    pub fn compare_detailed(&self, a: &Solution, b: &Solution) -> Comparison {
        match self {
            DominanceComparator::Pareto => Comparison::plain(pareto_dominance(a, b)),
            DominanceComparator::ConstraintAware => Comparison::plain(
                constraint_dominance(a, b).unwrap_or_else(|| pareto_dominance(a, b)),
            ),
            DominanceComparator::EpsilonBox(epsilon_box) => match constraint_dominance(a, b) {
                Some(dominance) => Comparison::plain(dominance),
                None => epsilon_box.compare(a, b),
            },
        }
    }
}

/// Pareto dominance, respecting each objective's direction.
///
/// `a` dominates `b` iff `a` is no worse in every objective and strictly
/// better in at least one. NaN values are never better or worse.
pub fn pareto_dominance(a: &Solution, b: &Solution) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for i in 0..a.number_of_objectives().min(b.number_of_objectives()) {
        let va = a.canonical_objective(i);
        let vb = b.canonical_objective(i);

        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }

        if a_better_in_some && b_better_in_some {
            return Dominance::NonDominated;
        }
    }

    Dominance::from_flags(a_better_in_some, b_better_in_some)
}

/// Aggregate constraint dominance, or `None` when constraints do not decide.
pub fn constraint_dominance(a: &Solution, b: &Solution) -> Option<Dominance> {
    let va = a.constraint_violation();
    let vb = b.constraint_violation();

    if va == vb {
        None
    } else if va < vb {
        Some(Dominance::Dominates)
    } else {
        Some(Dominance::Dominated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Direction;

    fn sol(objs: &[f64]) -> Solution {
        Solution::new(objs.to_vec())
    }

    // ---- Pareto ----

    #[test]
    fn test_pareto_dominates() {
        assert_eq!(
            pareto_dominance(&sol(&[1.0, 1.0]), &sol(&[2.0, 1.0])),
            Dominance::Dominates
        );
        assert_eq!(
            pareto_dominance(&sol(&[2.0, 1.0]), &sol(&[1.0, 1.0])),
            Dominance::Dominated
        );
    }

    #[test]
    fn test_pareto_equal_is_non_dominated() {
        assert_eq!(
            pareto_dominance(&sol(&[1.0, 1.0]), &sol(&[1.0, 1.0])),
            Dominance::NonDominated
        );
    }

    #[test]
    fn test_pareto_trade_off() {
        assert_eq!(
            pareto_dominance(&sol(&[1.0, 4.0]), &sol(&[2.0, 3.0])),
            Dominance::NonDominated
        );
    }

    #[test]
    fn test_pareto_respects_maximize() {
        let dirs = vec![Direction::Minimize, Direction::Maximize];
        let a = sol(&[1.0, 5.0]).with_directions(dirs.clone());
        let b = sol(&[1.0, 3.0]).with_directions(dirs);
        assert_eq!(pareto_dominance(&a, &b), Dominance::Dominates);
    }

    #[test]
    fn test_sign_and_reverse() {
        assert_eq!(Dominance::Dominates.sign(), -1);
        assert_eq!(Dominance::Dominated.sign(), 1);
        assert_eq!(Dominance::NonDominated.sign(), 0);
        assert_eq!(Dominance::Dominates.reverse(), Dominance::Dominated);
        assert_eq!(Dominance::NonDominated.reverse(), Dominance::NonDominated);
    }

    // ---- Constraint-aware ----

    #[test]
    fn test_feasible_dominates_infeasible() {
        let feasible = sol(&[10.0, 10.0]);
        let infeasible = sol(&[0.0, 0.0]).with_constraints(vec![1.0]);
        let cmp = DominanceComparator::ConstraintAware;
        assert_eq!(cmp.compare(&feasible, &infeasible), Dominance::Dominates);
        assert_eq!(cmp.compare(&infeasible, &feasible), Dominance::Dominated);
    }

    #[test]
    fn test_smaller_violation_dominates() {
        let a = sol(&[5.0]).with_constraints(vec![0.5]);
        let b = sol(&[0.0]).with_constraints(vec![-2.0]);
        let cmp = DominanceComparator::ConstraintAware;
        assert_eq!(cmp.compare(&a, &b), Dominance::Dominates);
    }

    #[test]
    fn test_equal_violation_falls_back_to_pareto() {
        let a = sol(&[1.0, 1.0]).with_constraints(vec![1.0]);
        let b = sol(&[2.0, 2.0]).with_constraints(vec![-1.0]);
        let cmp = DominanceComparator::ConstraintAware;
        assert_eq!(cmp.compare(&a, &b), Dominance::Dominates);
    }

    #[test]
    fn test_pareto_ignores_constraints() {
        let a = sol(&[1.0, 1.0]).with_constraints(vec![5.0]);
        let b = sol(&[2.0, 2.0]);
        assert_eq!(DominanceComparator::Pareto.compare(&a, &b), Dominance::Dominates);
    }
}
