//! ε-box dominance archive.

use std::sync::Arc;

use log::trace;

use super::nondominated::{DuplicateMode, NondominatedPopulation};
use super::Archive;
use crate::dominance::{DominanceComparator, EpsilonBoxComparator, Epsilons};
use crate::error::Result;
use crate::population::Population;
use crate::solution::Solution;

/// Non-dominated archive under ε-box dominance.
///
/// Keeps at most one solution per ε-box. Every accepted insertion that is
/// not a same-box replacement counts as an ε-improvement; one that also
/// displaced a member from another box counts as a dominating improvement.
/// Both counters only grow.
///
/// # Examples
///
/// ```
/// use u_pareto::archive::EpsilonBoxDominanceArchive;
/// use u_pareto::dominance::Epsilons;
/// use u_pareto::solution::Solution;
///
/// let mut archive = EpsilonBoxDominanceArchive::new(Epsilons::uniform(1.0).unwrap());
///
/// assert!(archive.add(Solution::new(vec![0.5, 3.5])));  // new box
/// assert!(archive.add(Solution::new(vec![0.2, 3.1])));  // same box, nearer corner
/// assert!(archive.add(Solution::new(vec![0.5, 2.5])));  // dominates box (0, 3)
///
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.number_of_improvements(), 2);
/// assert_eq!(archive.number_of_dominating_improvements(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonBoxDominanceArchive {
    archive: NondominatedPopulation,
    comparator: EpsilonBoxComparator,
    number_of_improvements: usize,
    number_of_dominating_improvements: usize,
}

impl EpsilonBoxDominanceArchive {
    /// Creates an empty archive using the default same-box tie-break.
    pub fn new(epsilons: Epsilons) -> Self {
        Self::with_comparator(EpsilonBoxComparator::new(epsilons))
    }

    /// Creates an empty archive with a single ε for every objective.
    pub fn uniform(epsilon: f64) -> Result<Self> {
        Ok(Self::new(Epsilons::uniform(epsilon)?))
    }

    /// Creates an empty archive using `comparator`.
    pub fn with_comparator(comparator: EpsilonBoxComparator) -> Self {
        Self {
            archive: NondominatedPopulation::new(
                DominanceComparator::EpsilonBox(comparator.clone()),
                DuplicateMode::NoDuplicates,
            ),
            comparator,
            number_of_improvements: 0,
            number_of_dominating_improvements: 0,
        }
    }

    /// Offers `solution`; returns `true` if it was added.
    pub fn add(&mut self, solution: impl Into<Arc<Solution>>) -> bool {
        let solution = solution.into();
        let Some(insertion) = self.archive.scan(&solution) else {
            return false;
        };

        if !insertion.replaced_same_box {
            self.number_of_improvements += 1;
            if insertion.dominated_other_box {
                self.number_of_dominating_improvements += 1;
            }
            trace!(
                "epsilon improvement #{} ({} dominating): {:?}",
                self.number_of_improvements,
                self.number_of_dominating_improvements,
                solution.objectives()
            );
        }

        self.archive.remove_positions(&insertion.dominated);
        self.archive.force_add(solution);
        true
    }

    /// Offers every solution; returns `true` if any was added.
    pub fn add_all<S, I>(&mut self, solutions: I) -> bool
    where
        S: Into<Arc<Solution>>,
        I: IntoIterator<Item = S>,
    {
        Archive::add_all(self, solutions)
    }

    /// Number of insertions that were not same-box replacements.
    pub fn number_of_improvements(&self) -> usize {
        self.number_of_improvements
    }

    /// Number of improvements that dominated a member in another box.
    pub fn number_of_dominating_improvements(&self) -> usize {
        self.number_of_dominating_improvements
    }

    /// The ε-box comparator in use.
    pub fn comparator(&self) -> &EpsilonBoxComparator {
        &self.comparator
    }

    /// Always fails: replacing a member would bypass the dominance check.
    pub fn replace(
        &mut self,
        index: usize,
        solution: impl Into<Arc<Solution>>,
    ) -> Result<Arc<Solution>> {
        self.archive.replace(index, solution)
    }

    /// Removes the member at `index`. Counters are unaffected.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<Solution>> {
        self.archive.remove_at(index)
    }

    /// Removes `solution` (by identity). Counters are unaffected.
    pub fn remove(&mut self, solution: &Arc<Solution>) -> bool {
        self.archive.remove(solution)
    }

    /// Removes every member. Counters are unaffected.
    pub fn clear(&mut self) {
        self.archive.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Solution>> {
        self.archive.get(index)
    }

    pub fn contains(&self, solution: &Arc<Solution>) -> bool {
        self.archive.contains(solution)
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Solution>> {
        self.archive.iter()
    }

    pub fn population(&self) -> &Population {
        self.archive.population()
    }

    /// Deep copy of the members and the comparator. The copy's counters
    /// start where this archive's are.
    pub fn copy(&self) -> Self {
        Self {
            archive: self.archive.copy(),
            comparator: self.comparator.clone(),
            number_of_improvements: self.number_of_improvements,
            number_of_dominating_improvements: self.number_of_dominating_improvements,
        }
    }
}

impl Archive for EpsilonBoxDominanceArchive {
    fn offer(&mut self, solution: Arc<Solution>) -> bool {
        self.add(solution)
    }

    fn population(&self) -> &Population {
        self.archive.population()
    }
}

impl<'a> IntoIterator for &'a EpsilonBoxDominanceArchive {
    type Item = &'a Arc<Solution>;
    type IntoIter = std::slice::Iter<'a, Arc<Solution>>;

    fn into_iter(self) -> Self::IntoIter {
        self.archive.iter()
    }
}
