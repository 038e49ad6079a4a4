//! Non-dominated sorting and crowding distance.
//!
//! Orders a population into successive Pareto fronts and measures how
//! isolated each member is within its front, as used by NSGA-II style
//! selection.
//!
//! # Algorithms
//!
//! - [`SortingAlgorithm::Naive`]: peels one front at a time with the
//!   non-dominated insertion scan
//! - [`SortingAlgorithm::Fast`]: fast non-dominated sorting over a
//!   precomputed dominance matrix (Deb et al., 2002)
//! - [`crowding_distance`]: crowding distance assignment for diversity
//!   preservation
//!
//! Both algorithms assign identical ranks and crowding distances. Results
//! are a side-table aligned with population order; solutions themselves are
//! never annotated.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod crowding;
mod fast;
mod naive;
mod population;

pub use crowding::crowding_distance;
pub use population::NondominatedSortingPopulation;

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::dominance::DominanceComparator;
use crate::population::Population;
use crate::solution::Solution;

/// Rank and crowding distance of one solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    /// Front index; 0 is non-dominated within the sorted population.
    pub rank: usize,

    /// Isolation within the front; boundary members get `f64::INFINITY`.
    pub crowding_distance: f64,
}

impl Ranking {
    /// Crowded comparison: lower rank first, then larger crowding distance.
    ///
    /// ```
    /// use u_pareto::sorting::Ranking;
    ///
    /// let a = Ranking { rank: 0, crowding_distance: 0.5 };
    /// let b = Ranking { rank: 0, crowding_distance: f64::INFINITY };
    /// let c = Ranking { rank: 1, crowding_distance: f64::INFINITY };
    ///
    /// let mut all = vec![c, a, b];
    /// all.sort_by(Ranking::crowded_cmp);
    /// assert_eq!(all, vec![b, a, c]);
    /// ```
    pub fn crowded_cmp(&self, other: &Ranking) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.crowding_distance.total_cmp(&self.crowding_distance))
    }
}

/// Which front-peeling algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortingAlgorithm {
    /// Repeated non-dominated insertion, O(k * m * n²).
    Naive,
    /// Precomputed dominance matrix, O(m * n²).
    #[default]
    Fast,
}

/// Result of non-dominated sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NondominatedSortResult {
    /// Rank of each solution (0 = Pareto front).
    pub ranks: Vec<usize>,

    /// Crowding distance of each solution within its front.
    pub crowding_distances: Vec<f64>,

    /// Solutions grouped by front; each front lists population indices in
    /// ascending order.
    pub fronts: Vec<Vec<usize>>,
}

impl NondominatedSortResult {
    /// Rank and crowding distance of the solution at `index`.
    pub fn ranking(&self, index: usize) -> Option<Ranking> {
        Some(Ranking {
            rank: *self.ranks.get(index)?,
            crowding_distance: *self.crowding_distances.get(index)?,
        })
    }

    /// All rankings in population order.
    pub fn rankings(&self) -> Vec<Ranking> {
        self.ranks
            .iter()
            .zip(&self.crowding_distances)
            .map(|(&rank, &crowding_distance)| Ranking {
                rank,
                crowding_distance,
            })
            .collect()
    }

    pub fn number_of_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// Population indices of the Pareto front, empty for an empty
    /// population.
    pub fn pareto_front(&self) -> &[usize] {
        self.fronts.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Assigns ranks and crowding distances to a population.
///
/// # Examples
///
/// ```
/// use u_pareto::population::Population;
/// use u_pareto::solution::Solution;
/// use u_pareto::sorting::{NondominatedSorting, SortingAlgorithm};
///
/// let population: Population = vec![
///     Solution::new(vec![1.0, 4.0]),
///     Solution::new(vec![2.0, 3.0]),
///     Solution::new(vec![5.0, 5.0]),
/// ]
/// .into_iter()
/// .collect();
///
/// let result = NondominatedSorting::default()
///     .with_algorithm(SortingAlgorithm::Naive)
///     .evaluate(&population);
///
/// assert_eq!(result.ranks, vec![0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1], vec![2]]);
/// assert!(result.crowding_distances.iter().all(|d| d.is_infinite()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NondominatedSorting {
    comparator: DominanceComparator,
    algorithm: SortingAlgorithm,
}

impl NondominatedSorting {
    pub fn new(comparator: DominanceComparator, algorithm: SortingAlgorithm) -> Self {
        Self {
            comparator,
            algorithm,
        }
    }

    pub fn with_comparator(mut self, comparator: DominanceComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_algorithm(mut self, algorithm: SortingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn comparator(&self) -> &DominanceComparator {
        &self.comparator
    }

    pub fn algorithm(&self) -> SortingAlgorithm {
        self.algorithm
    }

    /// Ranks every member of `population` and computes crowding distances
    /// front by front.
    ///
    /// An empty population yields an empty result.
    pub fn evaluate(&self, population: &Population) -> NondominatedSortResult {
        let solutions = population.as_slice();

        let fronts = match self.algorithm {
            SortingAlgorithm::Naive => naive::naive_fronts(&self.comparator, solutions),
            SortingAlgorithm::Fast => fast::fast_fronts(&self.comparator, solutions),
        };

        let n = solutions.len();
        let mut ranks = vec![0usize; n];
        let mut crowding_distances = vec![0.0f64; n];

        for (rank, front) in fronts.iter().enumerate() {
            let members: Vec<&[f64]> = front.iter().map(|&i| solutions[i].objectives()).collect();
            let distances = crowding_distance(&members);

            for (&i, distance) in front.iter().zip(distances) {
                ranks[i] = rank;
                crowding_distances[i] = distance;
            }
        }

        debug!(
            "{:?} sort: {} solutions in {} fronts (front sizes {:?})",
            self.algorithm,
            n,
            fronts.len(),
            fronts.iter().map(Vec::len).collect::<Vec<_>>()
        );

        NondominatedSortResult {
            ranks,
            crowding_distances,
            fronts,
        }
    }

    /// Crowding distances of `front`, aligned with it.
    ///
    /// `front` is treated as one front regardless of the dominance between
    /// its members.
    pub fn update_crowding_distance(front: &[Arc<Solution>]) -> Vec<f64> {
        let members: Vec<&[f64]> = front.iter().map(|s| s.objectives()).collect();
        crowding_distance(&members)
    }
}
