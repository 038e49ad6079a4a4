//! ε-box dominance.
//!
//! Objective space is cut into boxes of width ε along each axis. Solutions
//! are compared by the Pareto rule over their box index vectors, so at most
//! one solution survives per box in an archive.

use super::{Comparison, Dominance};
use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// Box widths, one per objective.
///
/// An objective past the last defined ε reuses the last ε, so a single
/// value broadcasts to every objective.
///
/// ```
/// use u_pareto::dominance::Epsilons;
///
/// let eps = Epsilons::new(vec![0.1, 0.5]).unwrap();
/// assert_eq!(eps.get(0), 0.1);
/// assert_eq!(eps.get(1), 0.5);
/// assert_eq!(eps.get(7), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epsilons(Vec<f64>);

impl Epsilons {
    /// Creates ε values, one per objective.
    ///
    /// Returns an error if the list is empty or any value is not positive
    /// and finite.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(ParetoError::EmptyEpsilons);
        }
        if let Some(&bad) = values.iter().find(|&&e| !(e.is_finite() && e > 0.0)) {
            return Err(ParetoError::InvalidEpsilon(bad));
        }
        Ok(Self(values))
    }

    /// A single ε shared by every objective.
    pub fn uniform(epsilon: f64) -> Result<Self> {
        Self::new(vec![epsilon])
    }

    /// ε for objective `objective`.
    pub fn get(&self, objective: usize) -> f64 {
        let last = self.0.len() - 1;
        self.0[objective.min(last)]
    }

    /// Number of explicitly defined values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Rule deciding which of two solutions in the same ε-box is kept.
///
/// Both rules measure a squared Euclidean distance on the minimization-
/// equivalent objective values; the smaller distance wins. Exact ties fall
/// back to lexicographic order of those values, and if the two points are
/// identical the second (incumbent) solution wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SameBoxTieBreak {
    /// Distance to the box's lower (ideal) corner.
    #[default]
    CornerDistance,

    /// Distance to the box's center.
    CenterDistance,
}

/// ε-box dominance comparator.
///
/// # Examples
///
/// ```
/// use u_pareto::dominance::{Dominance, EpsilonBoxComparator, Epsilons};
/// use u_pareto::solution::Solution;
///
/// let cmp = EpsilonBoxComparator::new(Epsilons::uniform(1.0).unwrap());
///
/// // Different boxes: (0, 0) dominates (1, 0)
/// let r = cmp.compare(&Solution::new(vec![0.5, 0.5]), &Solution::new(vec![1.5, 0.2]));
/// assert_eq!(r.dominance, Dominance::Dominates);
/// assert!(!r.same_box);
///
/// // Same box (0, 0): the point nearer the box corner wins
/// let r = cmp.compare(&Solution::new(vec![0.1, 0.1]), &Solution::new(vec![0.9, 0.9]));
/// assert_eq!(r.dominance, Dominance::Dominates);
/// assert!(r.same_box);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsilonBoxComparator {
    epsilons: Epsilons,
    tie_break: SameBoxTieBreak,
}

impl EpsilonBoxComparator {
    pub fn new(epsilons: Epsilons) -> Self {
        Self {
            epsilons,
            tie_break: SameBoxTieBreak::default(),
        }
    }

    /// Sets the same-box tie-break rule.
    pub fn with_tie_break(mut self, tie_break: SameBoxTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn epsilons(&self) -> &Epsilons {
        &self.epsilons
    }

    pub fn tie_break(&self) -> SameBoxTieBreak {
        self.tie_break
    }

    /// Box index of `solution` along `objective`: `floor(value / ε)` on the
    /// minimization-equivalent value.
    pub fn box_index(&self, solution: &Solution, objective: usize) -> f64 {
        (solution.canonical_objective(objective) / self.epsilons.get(objective)).floor()
    }

    /// Returns `true` if both solutions map to the same box vector.
    pub fn is_same_box(&self, a: &Solution, b: &Solution) -> bool {
        (0..a.number_of_objectives().min(b.number_of_objectives()))
            .all(|i| self.box_index(a, i) == self.box_index(b, i))
    }

    /// Compares `a` against `b` over box indices.
    ///
    /// Never returns [`Dominance::NonDominated`] for two solutions in the
    /// same box; `same_box` is set in that case.
    pub fn compare(&self, a: &Solution, b: &Solution) -> Comparison {
        let n = a.number_of_objectives().min(b.number_of_objectives());
        let mut a_better_in_some = false;
        let mut b_better_in_some = false;

        for i in 0..n {
            let ia = self.box_index(a, i);
            let ib = self.box_index(b, i);

            if ia < ib {
                a_better_in_some = true;
            } else if ib < ia {
                b_better_in_some = true;
            }

            if a_better_in_some && b_better_in_some {
                return Comparison::plain(Dominance::NonDominated);
            }
        }

        if a_better_in_some || b_better_in_some {
            return Comparison::plain(Dominance::from_flags(a_better_in_some, b_better_in_some));
        }

        Comparison {
            dominance: self.resolve_same_box(a, b, n),
            same_box: true,
        }
    }

    fn resolve_same_box(&self, a: &Solution, b: &Solution, n: usize) -> Dominance {
        let da = self.tie_break_distance(a, n);
        let db = self.tie_break_distance(b, n);

        if da < db {
            return Dominance::Dominates;
        }
        if db < da {
            return Dominance::Dominated;
        }

        for i in 0..n {
            let va = a.canonical_objective(i);
            let vb = b.canonical_objective(i);
            if va < vb {
                return Dominance::Dominates;
            }
            if vb < va {
                return Dominance::Dominated;
            }
        }

        Dominance::Dominated
    }

    fn tie_break_distance(&self, solution: &Solution, n: usize) -> f64 {
        let offset = match self.tie_break {
            SameBoxTieBreak::CornerDistance => 0.0,
            SameBoxTieBreak::CenterDistance => 0.5,
        };

        (0..n)
            .map(|i| {
                let epsilon = self.epsilons.get(i);
                let anchor = (self.box_index(solution, i) + offset) * epsilon;
                (solution.canonical_objective(i) - anchor).powi(2)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Direction;

    fn sol(objs: &[f64]) -> Solution {
        Solution::new(objs.to_vec())
    }

    fn cmp(eps: f64) -> EpsilonBoxComparator {
        EpsilonBoxComparator::new(Epsilons::uniform(eps).unwrap())
    }

    // ---- Epsilons ----

    #[test]
    fn test_epsilons_rejects_invalid() {
        assert_eq!(Epsilons::new(Vec::<f64>::new()), Err(ParetoError::EmptyEpsilons));
        assert_eq!(Epsilons::uniform(0.0), Err(ParetoError::InvalidEpsilon(0.0)));
        assert!(Epsilons::uniform(-1.0).is_err());
        assert!(Epsilons::uniform(f64::NAN).is_err());
        assert!(Epsilons::uniform(f64::INFINITY).is_err());
    }

    #[test]
    fn test_epsilons_broadcast() {
        let eps = Epsilons::uniform(0.25).unwrap();
        assert_eq!(eps.get(0), 0.25);
        assert_eq!(eps.get(3), 0.25);
        assert_eq!(eps.len(), 1);
    }

    // ---- Box dominance ----

    #[test]
    fn test_box_index() {
        let c = cmp(0.5);
        let s = sol(&[1.2, -0.1]);
        assert_eq!(c.box_index(&s, 0), 2.0);
        assert_eq!(c.box_index(&s, 1), -1.0);
    }

    #[test]
    fn test_box_index_maximize() {
        let c = cmp(1.0);
        let s = sol(&[2.5]).with_directions(vec![Direction::Maximize]);
        assert_eq!(c.box_index(&s, 0), -3.0);
    }

    #[test]
    fn test_different_boxes_dominate() {
        let c = cmp(1.0);
        let r = c.compare(&sol(&[0.5, 0.5]), &sol(&[1.5, 1.5]));
        assert_eq!(r.dominance, Dominance::Dominates);
        assert!(!r.same_box);
    }

    #[test]
    fn test_shared_row_still_dominates() {
        // Same box on axis 0, better box on axis 1
        let c = cmp(1.0);
        let r = c.compare(&sol(&[0.9, 0.5]), &sol(&[0.1, 1.5]));
        assert_eq!(r.dominance, Dominance::Dominates);
        assert!(!r.same_box);
    }

    #[test]
    fn test_non_dominated_boxes() {
        let c = cmp(1.0);
        let r = c.compare(&sol(&[0.5, 2.5]), &sol(&[2.5, 0.5]));
        assert_eq!(r.dominance, Dominance::NonDominated);
        assert!(!r.same_box);
    }

    // ---- Same-box tie-break ----

    #[test]
    fn test_same_box_corner_distance() {
        let c = cmp(1.0);
        let near = sol(&[0.2, 0.2]);
        let far = sol(&[0.6, 0.7]);

        let r = c.compare(&near, &far);
        assert!(r.same_box);
        assert_eq!(r.dominance, Dominance::Dominates);

        let r = c.compare(&far, &near);
        assert!(r.same_box);
        assert_eq!(r.dominance, Dominance::Dominated);
    }

    #[test]
    fn test_same_box_center_distance() {
        let c = cmp(1.0).with_tie_break(SameBoxTieBreak::CenterDistance);
        let center = sol(&[0.5, 0.5]);
        let corner = sol(&[0.05, 0.05]);
        assert_eq!(c.compare(&center, &corner).dominance, Dominance::Dominates);
        assert_eq!(c.compare(&corner, &center).dominance, Dominance::Dominated);
    }

    #[test]
    fn test_same_box_equal_distance_lexicographic() {
        let c = cmp(1.0);
        let a = sol(&[0.3, 0.4]);
        let b = sol(&[0.4, 0.3]);
        assert_eq!(c.compare(&a, &b).dominance, Dominance::Dominates);
        assert_eq!(c.compare(&b, &a).dominance, Dominance::Dominated);
    }

    #[test]
    fn test_identical_keeps_incumbent() {
        let c = cmp(1.0);
        let a = sol(&[0.3, 0.4]);
        let r = c.compare(&a, &a.clone());
        assert!(r.same_box);
        assert_eq!(r.dominance, Dominance::Dominated);
    }

    #[test]
    fn test_is_same_box() {
        let c = cmp(0.5);
        assert!(c.is_same_box(&sol(&[0.1, 0.6]), &sol(&[0.4, 0.9])));
        assert!(!c.is_same_box(&sol(&[0.1, 0.6]), &sol(&[0.6, 0.9])));
    }

    #[test]
    fn test_per_objective_epsilons() {
        let c = EpsilonBoxComparator::new(Epsilons::new(vec![1.0, 10.0]).unwrap());
        // Axis 1 differs by 5 but shares a 10-wide box
        assert!(c.is_same_box(&sol(&[0.5, 1.0]), &sol(&[0.7, 6.0])));
    }
}
