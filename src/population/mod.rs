//! Insertion-ordered solution container.
//!
//! [`Population`] is the base container every archive builds on. It holds
//! solutions behind [`Arc`], so membership is by identity: two members with
//! equal objective values are still distinct, and the same `Arc` may appear
//! more than once. Cloning a population is shallow (members are shared);
//! [`Population::copy`] is deep.

use std::cmp::Ordering;
use std::ops::Index;
use std::sync::Arc;

use crate::error::{ParetoError, Result};
use crate::solution::Solution;

/// An ordered, mutable sequence of solutions with no uniqueness constraint.
///
/// # Examples
///
/// ```
/// use u_pareto::population::Population;
/// use u_pareto::solution::Solution;
///
/// let mut pop = Population::new();
/// pop.add(Solution::new(vec![3.0, 1.0]));
/// pop.add(Solution::new(vec![1.0, 2.0]));
///
/// assert_eq!(pop.len(), 2);
/// assert_eq!(pop.lower_bounds().unwrap(), vec![1.0, 1.0]);
/// assert_eq!(pop.upper_bounds().unwrap(), vec![3.0, 2.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Population {
    solutions: Vec<Arc<Solution>>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a solution. Always succeeds.
    pub fn add(&mut self, solution: impl Into<Arc<Solution>>) -> bool {
        self.solutions.push(solution.into());
        true
    }

    /// Appends every solution; returns `true` if any was added.
    pub fn add_all<S, I>(&mut self, solutions: I) -> bool
    where
        S: Into<Arc<Solution>>,
        I: IntoIterator<Item = S>,
    {
        let before = self.solutions.len();
        self.solutions.extend(solutions.into_iter().map(Into::into));
        self.solutions.len() > before
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Solution>> {
        self.solutions.get(index)
    }

    /// Removes and returns the member at `index`, or `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<Solution>> {
        if index < self.solutions.len() {
            Some(self.solutions.remove(index))
        } else {
            None
        }
    }

    /// Removes the first occurrence of `solution` (by identity).
    pub fn remove(&mut self, solution: &Arc<Solution>) -> bool {
        match self.index_of(solution) {
            Some(index) => {
                self.solutions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every member matching `predicate`; returns how many were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Solution) -> bool,
    {
        let before = self.solutions.len();
        self.solutions.retain(|s| !predicate(s));
        before - self.solutions.len()
    }

    /// Position of the first occurrence of `solution` (by identity).
    pub fn index_of(&self, solution: &Arc<Solution>) -> Option<usize> {
        self.solutions.iter().position(|s| Arc::ptr_eq(s, solution))
    }

    pub fn contains(&self, solution: &Arc<Solution>) -> bool {
        self.index_of(solution).is_some()
    }

    /// Replaces the member at `index`, returning the old member.
    pub fn replace(
        &mut self,
        index: usize,
        solution: impl Into<Arc<Solution>>,
    ) -> Result<Arc<Solution>> {
        let len = self.solutions.len();
        match self.solutions.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, solution.into())),
            None => Err(ParetoError::IndexOutOfBounds { index, len }),
        }
    }

    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Solution>> {
        self.solutions.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Solution>] {
        &self.solutions
    }

    /// Shallow subset of the members matching `predicate`, in order.
    pub fn filter<F>(&self, mut predicate: F) -> Population
    where
        F: FnMut(&Solution) -> bool,
    {
        self.solutions
            .iter()
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }

    /// Stable sort of the members.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Solution, &Solution) -> Ordering,
    {
        self.solutions.sort_by(|a, b| compare(a, b));
    }

    /// Sorts with `compare`, then drops trailing members until at most
    /// `size` remain.
    pub fn truncate<F>(&mut self, size: usize, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> Ordering,
    {
        self.sort_by(compare);
        self.solutions.truncate(size);
    }

    /// Per-objective minimum over all members (ideal point for minimization).
    pub fn lower_bounds(&self) -> Result<Vec<f64>> {
        self.fold_bounds(f64::min)
    }

    /// Per-objective maximum over all members.
    pub fn upper_bounds(&self) -> Result<Vec<f64>> {
        self.fold_bounds(f64::max)
    }

    fn fold_bounds(&self, pick: fn(f64, f64) -> f64) -> Result<Vec<f64>> {
        let mut members = self.solutions.iter();
        let first = members.next().ok_or(ParetoError::EmptyPopulation)?;
        let mut bounds = first.objectives().to_vec();

        for solution in members {
            if solution.number_of_objectives() != bounds.len() {
                return Err(ParetoError::ObjectiveCountMismatch {
                    expected: bounds.len(),
                    actual: solution.number_of_objectives(),
                });
            }
            for (bound, &value) in bounds.iter_mut().zip(solution.objectives()) {
                *bound = pick(*bound, value);
            }
        }

        Ok(bounds)
    }

    /// Deep copy: the result holds fresh copies of every member.
    pub fn copy(&self) -> Population {
        self.solutions
            .iter()
            .map(|s| Arc::new(Solution::clone(s)))
            .collect()
    }
}

impl Index<usize> for Population {
    type Output = Arc<Solution>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.solutions[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Arc<Solution>;
    type IntoIter = std::slice::Iter<'a, Arc<Solution>>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl IntoIterator for Population {
    type Item = Arc<Solution>;
    type IntoIter = std::vec::IntoIter<Arc<Solution>>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl FromIterator<Arc<Solution>> for Population {
    fn from_iter<I: IntoIterator<Item = Arc<Solution>>>(iter: I) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Solution> for Population {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}
