//! Bounded archive with an adaptive density grid.
//!
//! Objective space between the members' current extremes is cut into
//! `divisions` equal slices per axis. Each member falls in one cell, and the
//! archive counts members per cell. When the archive overflows, a member of
//! the densest cell is evicted, unless the newcomer itself landed in a
//! densest cell, in which case the newcomer is dropped.
//!
//! The grid follows the members' bounds. A candidate outside the recorded
//! bounds, an insertion into an empty archive, or a removal that empties a
//! cell triggers a full rebuild: recompute bounds, then recount every member.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace, warn};

use super::config::AdaptiveGridConfig;
use super::nondominated::NondominatedPopulation;
use super::Archive;
use crate::dominance::DominanceComparator;
use crate::error::Result;
use crate::population::Population;
use crate::solution::Solution;

/// Capacity-bounded non-dominated archive pruned by grid density.
///
/// Dominance is plain Pareto dominance. Eviction picks the first member, in
/// insertion order, that sits in a cell of maximal density, so the outcome
/// is reproducible.
///
/// # Examples
///
/// ```
/// use u_pareto::archive::{AdaptiveGridArchive, AdaptiveGridConfig};
/// use u_pareto::solution::Solution;
///
/// let config = AdaptiveGridConfig::default().with_capacity(2).with_divisions(2);
/// let mut archive = AdaptiveGridArchive::new(2, config).unwrap();
///
/// archive.add(Solution::new(vec![0.0, 4.0]));
/// archive.add(Solution::new(vec![4.0, 0.0]));
///
/// // Lands in the cell already holding (0, 4), which is the densest: dropped
/// assert!(!archive.add(Solution::new(vec![1.0, 3.0])));
/// assert_eq!(archive.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveGridArchive {
    archive: NondominatedPopulation,
    config: AdaptiveGridConfig,
    number_of_objectives: usize,
    minimum: Vec<f64>,
    maximum: Vec<f64>,
    density: HashMap<u32, usize>,
}

impl AdaptiveGridArchive {
    /// Creates an empty archive for solutions with `number_of_objectives`
    /// objectives.
    ///
    /// Fails if the configuration is invalid, including when
    /// `divisions ^ number_of_objectives` does not fit a `u32` cell index.
    pub fn new(number_of_objectives: usize, config: AdaptiveGridConfig) -> Result<Self> {
        config.validate(number_of_objectives)?;

        let mut archive = Self {
            archive: NondominatedPopulation::new(
                DominanceComparator::Pareto,
                config.duplicate_mode,
            ),
            config,
            number_of_objectives,
            minimum: Vec::new(),
            maximum: Vec::new(),
            density: HashMap::new(),
        };
        archive.adapt_grid();
        Ok(archive)
    }

    /// Shorthand for [`new`](Self::new) with the given capacity and
    /// divisions and default duplicate handling.
    pub fn with_capacity(
        capacity: usize,
        number_of_objectives: usize,
        divisions: u32,
    ) -> Result<Self> {
        let config = AdaptiveGridConfig::default()
            .with_capacity(capacity)
            .with_divisions(divisions);
        Self::new(number_of_objectives, config)
    }

    /// Offers `solution`; returns `true` if it was kept.
    ///
    /// # Panics
    /// Panics if the solution's objective count differs from the archive's.
    pub fn add(&mut self, solution: impl Into<Arc<Solution>>) -> bool {
        let solution = solution.into();
        assert_eq!(
            solution.number_of_objectives(),
            self.number_of_objectives,
            "solution objective count does not match adaptive grid archive"
        );

        let Some(insertion) = self.archive.scan(&solution) else {
            return false;
        };
        self.remove_positions(&insertion.dominated);

        if self.archive.is_empty() {
            self.archive.force_add(solution);
            self.adapt_grid();
            return true;
        }

        self.archive.force_add(Arc::clone(&solution));

        let cell = match self.find_index(&solution) {
            Some(cell) => {
                *self.density.entry(cell).or_insert(0) += 1;
                cell
            }
            None => {
                self.adapt_grid();
                match self.find_index(&solution) {
                    Some(cell) => cell,
                    None => {
                        warn!(
                            "candidate {:?} outside grid bounds after rebuild; dropping",
                            solution.objectives()
                        );
                        self.remove(&solution);
                        return false;
                    }
                }
            }
        };

        if self.archive.len() <= self.config.capacity {
            return true;
        }

        let densest = self.find_densest_cell().map(|c| self.density(c));
        if densest == Some(self.density(cell)) {
            debug!(
                "archive over capacity; candidate {:?} in densest cell {} rejected",
                solution.objectives(),
                cell
            );
            self.remove(&solution);
            false
        } else {
            if let Some(victim) = self.pick_solution_from_densest_cell() {
                if let Some(evicted) = self.remove_at(victim) {
                    debug!(
                        "archive over capacity; evicted {:?} from densest cell",
                        evicted.objectives()
                    );
                }
            }
            true
        }
    }

    /// Offers every solution; returns `true` if any was kept.
    pub fn add_all<S, I>(&mut self, solutions: I) -> bool
    where
        S: Into<Arc<Solution>>,
        I: IntoIterator<Item = S>,
    {
        Archive::add_all(self, solutions)
    }

    /// Always fails: replacing a member would bypass the dominance check.
    pub fn replace(
        &mut self,
        index: usize,
        solution: impl Into<Arc<Solution>>,
    ) -> Result<Arc<Solution>> {
        self.archive.replace(index, solution)
    }

    /// Removes the member at `index`.
    ///
    /// Decrements its cell, or rebuilds the grid if the cell becomes empty.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<Solution>> {
        let cell = self.archive.get(index).and_then(|s| self.find_index(s));
        let removed = self.archive.remove_at(index)?;

        match cell {
            Some(cell) if self.decrement_density(cell) > 0 => {}
            _ => self.adapt_grid(),
        }
        Some(removed)
    }

    /// Removes `solution` (by identity).
    pub fn remove(&mut self, solution: &Arc<Solution>) -> bool {
        match self.archive.index_of(solution) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Removes every member and resets the grid to its empty state.
    pub fn clear(&mut self) {
        self.archive.clear();
        self.adapt_grid();
    }

    /// Grid cell of `solution` under the current bounds, or `None` if the
    /// solution lies outside them.
    ///
    /// Along objective `i` the cell coordinate is
    /// `floor(divisions * (value - min_i) / (max_i - min_i))`, with
    /// `value == max_i` mapped to the last division; coordinates combine
    /// with stride `divisions ^ i`.
    pub fn find_index(&self, solution: &Solution) -> Option<u32> {
        let divisions = self.config.divisions;
        let mut index = 0u32;
        let mut stride = 1u32;

        for (i, (&lower, &upper)) in self.minimum.iter().zip(&self.maximum).enumerate() {
            let value = *solution.objectives().get(i)?;

            if value < lower || value > upper {
                return None;
            }

            let range = upper - lower;
            let offset = if range > 0.0 {
                ((divisions as f64 * ((value - lower) / range)) as u32).min(divisions - 1)
            } else {
                0
            };

            index += offset * stride;
            stride = stride.wrapping_mul(divisions);
        }

        Some(index)
    }

    /// Number of members in grid cell `cell`.
    pub fn density(&self, cell: u32) -> usize {
        self.density.get(&cell).copied().unwrap_or(0)
    }

    /// Sum of all cell counts. Equals [`len`](Self::len) whenever the grid
    /// is consistent with the membership.
    pub fn total_density(&self) -> usize {
        self.density.values().sum()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn number_of_divisions(&self) -> u32 {
        self.config.divisions
    }

    pub fn bisections(&self) -> u32 {
        self.config.bisections()
    }

    pub fn number_of_objectives(&self) -> usize {
        self.number_of_objectives
    }

    /// Lower grid bound per objective; `+inf` while the archive is empty.
    pub fn minimum(&self) -> &[f64] {
        &self.minimum
    }

    /// Upper grid bound per objective; `-inf` while the archive is empty.
    pub fn maximum(&self) -> &[f64] {
        &self.maximum
    }

    pub fn config(&self) -> &AdaptiveGridConfig {
        &self.config
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Solution>> {
        self.archive.get(index)
    }

    pub fn index_of(&self, solution: &Arc<Solution>) -> Option<usize> {
        self.archive.index_of(solution)
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

    /// Deep copy; the copy's grid is rebuilt from its own members.
    pub fn copy(&self) -> Self {
        let mut copy = Self {
            archive: self.archive.copy(),
            config: self.config.clone(),
            number_of_objectives: self.number_of_objectives,
            minimum: Vec::new(),
            maximum: Vec::new(),
            density: HashMap::new(),
        };
        copy.adapt_grid();
        copy
    }

    /// Recomputes the bounds from the current members and recounts every
    /// cell. An empty archive gets `+inf`/`-inf` bounds so that every
    /// lookup misses.
    fn adapt_grid(&mut self) {
        let m = self.number_of_objectives;
        self.minimum = vec![f64::INFINITY; m];
        self.maximum = vec![f64::NEG_INFINITY; m];

        for solution in self.archive.iter() {
            for (i, &value) in solution.objectives().iter().enumerate().take(m) {
                self.minimum[i] = self.minimum[i].min(value);
                self.maximum[i] = self.maximum[i].max(value);
            }
        }

        let mut density = HashMap::with_capacity(self.archive.len());
        for solution in self.archive.iter() {
            if let Some(cell) = self.find_index(solution) {
                *density.entry(cell).or_insert(0) += 1;
            }
        }
        self.density = density;

        trace!(
            "adaptive grid rebuilt: {} members, bounds {:?}..{:?}",
            self.archive.len(),
            self.minimum,
            self.maximum
        );
    }

    /// Decrements `cell`, returning the remaining count.
    fn decrement_density(&mut self, cell: u32) -> usize {
        let remaining = self.density(cell).saturating_sub(1);
        if remaining == 0 {
            self.density.remove(&cell);
        } else {
            self.density.insert(cell, remaining);
        }
        remaining
    }

    /// Removes dominated members at `positions` (ascending), keeping the
    /// grid consistent.
    fn remove_positions(&mut self, positions: &[usize]) {
        let mut rebuild = false;

        for &index in positions.iter().rev() {
            let cell = self.archive.get(index).and_then(|s| self.find_index(s));
            if self.archive.remove_at(index).is_none() {
                continue;
            }
            match cell {
                Some(cell) if self.decrement_density(cell) > 0 => {}
                _ => rebuild = true,
            }
        }

        if rebuild {
            self.adapt_grid();
        }
    }

    /// Cell of the first member, in insertion order, with maximal density.
    fn find_densest_cell(&self) -> Option<u32> {
        self.densest_member().map(|(_, cell)| cell)
    }

    /// Position of the first member, in insertion order, with maximal
    /// density.
    fn pick_solution_from_densest_cell(&self) -> Option<usize> {
        self.densest_member().map(|(index, _)| index)
    }

    fn densest_member(&self) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32, usize)> = None;

        for (index, solution) in self.archive.iter().enumerate() {
            let Some(cell) = self.find_index(solution) else {
                continue;
            };
            let value = self.density(cell);
            if best.map_or(true, |(_, _, top)| value > top) {
                best = Some((index, cell, value));
            }
        }

        best.map(|(index, cell, _)| (index, cell))
    }
}

impl Archive for AdaptiveGridArchive {
    fn offer(&mut self, solution: Arc<Solution>) -> bool {
        self.add(solution)
    }

    fn population(&self) -> &Population {
        self.archive.population()
    }
}

impl<'a> IntoIterator for &'a AdaptiveGridArchive {
    type Item = &'a Arc<Solution>;
    type IntoIter = std::slice::Iter<'a, Arc<Solution>>;

    fn into_iter(self) -> Self::IntoIter {
        self.archive.iter()
    }
}
