//! Population that keeps its own ranking.

use std::sync::Arc;

use log::trace;

use super::{NondominatedSorting, Ranking};
use crate::population::Population;
use crate::solution::Solution;

/// A population that ranks its members on demand.
///
/// Any modification marks the rankings stale; the next query re-sorts the
/// whole population. [`truncate`](Self::truncate) and
/// [`prune`](Self::prune) shrink the population by the crowded comparison,
/// as in NSGA-II environmental selection.
///
/// # Examples
///
/// ```
/// use u_pareto::solution::Solution;
/// use u_pareto::sorting::NondominatedSortingPopulation;
///
/// let mut population = NondominatedSortingPopulation::default();
/// population.add(Solution::new(vec![1.0, 4.0]));
/// population.add(Solution::new(vec![5.0, 5.0]));
/// population.add(Solution::new(vec![2.0, 3.0]));
///
/// assert_eq!(population.ranking(1).unwrap().rank, 1);
///
/// population.truncate(2);
/// assert_eq!(population.len(), 2);
/// assert!(population.rankings().iter().all(|r| r.rank == 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortingPopulation {
    population: Population,
    sorting: NondominatedSorting,
    rankings: Vec<Ranking>,
    modified: bool,
}

impl NondominatedSortingPopulation {
    pub fn new(sorting: NondominatedSorting) -> Self {
        Self {
            population: Population::new(),
            sorting,
            rankings: Vec::new(),
            modified: false,
        }
    }

    pub fn add(&mut self, solution: impl Into<Arc<Solution>>) -> bool {
        self.modified = true;
        self.population.add(solution)
    }

    pub fn add_all<S, I>(&mut self, solutions: I) -> bool
    where
        S: Into<Arc<Solution>>,
        I: IntoIterator<Item = S>,
    {
        self.modified = true;
        self.population.add_all(solutions)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Arc<Solution>> {
        let removed = self.population.remove_at(index);
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Removes `solution` (by identity).
    pub fn remove(&mut self, solution: &Arc<Solution>) -> bool {
        let removed = self.population.remove(solution);
        if removed {
            self.modified = true;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.modified = true;
        self.population.clear();
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Solution>> {
        self.population.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Solution>> {
        self.population.iter()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn sorting(&self) -> &NondominatedSorting {
        &self.sorting
    }

    /// Re-sorts the population now.
    pub fn update(&mut self) {
        self.rankings = self.sorting.evaluate(&self.population).rankings();
        self.modified = false;
    }

    /// Rankings aligned with population order, re-sorting if stale.
    pub fn rankings(&mut self) -> &[Ranking] {
        if self.modified {
            self.update();
        }
        &self.rankings
    }

    pub fn ranking(&mut self, index: usize) -> Option<Ranking> {
        self.rankings().get(index).copied()
    }

    /// Keeps the `size` best members by the crowded comparison.
    ///
    /// Crowding distances are those of the full population before
    /// truncation.
    pub fn truncate(&mut self, size: usize) {
        if size >= self.len() {
            return;
        }
        self.rankings();

        let mut ranked: Vec<(Arc<Solution>, Ranking)> = self
            .population
            .iter()
            .cloned()
            .zip(self.rankings.iter().copied())
            .collect();
        ranked.sort_by(|a, b| a.1.crowded_cmp(&b.1));
        ranked.truncate(size);

        trace!(
            "truncated population from {} to {} members",
            self.population.len(),
            size
        );

        self.population = ranked.into_iter().map(|(s, _)| s).collect();
        self.modified = true;
    }

    /// Reduces the population to `size` members.
    ///
    /// Whole fronts are kept while they fit. From the first front that does
    /// not fit, members are removed one at a time, least crowded first, with
    /// crowding distances recomputed after every removal.
    pub fn prune(&mut self, size: usize) {
        if size >= self.len() {
            return;
        }
        if size == 0 {
            self.clear();
            return;
        }
        self.rankings();

        let mut ranked: Vec<(Arc<Solution>, usize)> = self
            .population
            .iter()
            .cloned()
            .zip(self.rankings.iter().map(|r| r.rank))
            .collect();
        ranked.sort_by_key(|&(_, rank)| rank);

        let cutoff = ranked[size - 1].1;
        let (kept, rest): (Vec<_>, Vec<_>) = ranked.into_iter().partition(|&(_, r)| r < cutoff);
        let mut front: Vec<Arc<Solution>> = rest
            .into_iter()
            .filter(|&(_, r)| r == cutoff)
            .map(|(s, _)| s)
            .collect();

        let mut removed = 0;
        while kept.len() + front.len() > size {
            let distances = NondominatedSorting::update_crowding_distance(&front);
            let least_crowded = distances
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i);
            match least_crowded {
                Some(i) => {
                    front.remove(i);
                    removed += 1;
                }
                None => break,
            }
        }

        trace!("pruned {} members from front {}", removed, cutoff);

        self.population = kept
            .into_iter()
            .map(|(s, _)| s)
            .chain(front)
            .collect();
        self.modified = true;
    }
}

impl<'a> IntoIterator for &'a NondominatedSortingPopulation {
    type Item = &'a Arc<Solution>;
    type IntoIter = std::slice::Iter<'a, Arc<Solution>>;

    fn into_iter(self) -> Self::IntoIter {
        self.population.iter()
    }
}
