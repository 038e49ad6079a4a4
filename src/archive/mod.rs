//! Non-dominated archives.
//!
//! Every archive keeps its members mutually non-dominated under its
//! [`DominanceComparator`](crate::dominance::DominanceComparator). They differ
//! in what else they enforce:
//!
//! - [`NondominatedPopulation`]: unbounded; duplicates handled by a
//!   [`DuplicateMode`]
//! - [`EpsilonBoxDominanceArchive`]: at most one member per ε-box; counts
//!   ε-improvements for convergence tracking
//! - [`AdaptiveGridArchive`]: bounded capacity; evicts from the most crowded
//!   cell of an adaptive grid over objective space
//!
//! Rejecting a candidate is a normal outcome, reported by `add` returning
//! `false`.
//!
//! Archives are single-threaded: mutate them from one thread, or guard them
//! externally.
//!
//! # References
//!
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multiobjective Optimization"
//! - Knowles & Corne (2000), "Approximating the Nondominated Front Using the
//!   Pareto Archived Evolution Strategy"

mod adaptive_grid;
mod config;
mod epsilon_box;
pub(crate) mod nondominated;

pub use adaptive_grid::AdaptiveGridArchive;
pub use config::AdaptiveGridConfig;
pub use epsilon_box::EpsilonBoxDominanceArchive;
pub use nondominated::{DuplicateMode, NondominatedPopulation};

use std::sync::Arc;

use crate::population::Population;
use crate::solution::Solution;

/// Common surface of all archive kinds.
///
/// ```
/// use u_pareto::archive::{Archive, NondominatedPopulation};
/// use u_pareto::solution::Solution;
///
/// fn fill<A: Archive>(archive: &mut A) {
///     archive.add_all(vec![
///         Solution::new(vec![1.0, 3.0]),
///         Solution::new(vec![3.0, 1.0]),
///         Solution::new(vec![4.0, 4.0]),
///     ]);
/// }
///
/// let mut archive = NondominatedPopulation::default();
/// fill(&mut archive);
/// assert_eq!(Archive::len(&archive), 2);
/// ```
pub trait Archive {
    /// Offers a candidate; returns `true` if it was kept.
    fn offer(&mut self, solution: Arc<Solution>) -> bool;

    /// Current members, in insertion order.
    fn population(&self) -> &Population;

    /// Offers every solution; returns `true` if any was kept.
    fn add_all<S, I>(&mut self, solutions: I) -> bool
    where
        Self: Sized,
        S: Into<Arc<Solution>>,
        I: IntoIterator<Item = S>,
    {
        solutions
            .into_iter()
            .fold(false, |changed, s| self.offer(s.into()) || changed)
    }

    fn len(&self) -> usize {
        self.population().len()
    }

    fn is_empty(&self) -> bool {
        self.population().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Arc<Solution>> {
        self.population().iter()
    }
}
