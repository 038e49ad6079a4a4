//! The [`Solution`] value and its optimization [`Direction`]s.

use super::variable::Variable;

/// Optimization direction of a single objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower values are better.
    #[default]
    Minimize,

    /// Higher values are better.
    Maximize,
}

impl Direction {
    /// Maps a raw objective value to its minimization-equivalent value.
    #[inline]
    pub fn canonical(self, value: f64) -> f64 {
        match self {
            Direction::Minimize => value,
            Direction::Maximize => -value,
        }
    }
}

/// An evaluated candidate solution.
///
/// Holds objective values (each tagged with a [`Direction`]), constraint
/// values, and optional decision variables. A constraint value of `0.0`
/// means satisfied; any other value is a violation whose magnitude is its
/// absolute value (see [`crate::constraint`]).
///
/// Archives store solutions behind [`Arc`](std::sync::Arc), so a solution is
/// frozen once inserted. To change an archived solution, clone it, modify
/// the clone, and add the clone.
///
/// # Examples
///
/// ```
/// use u_pareto::solution::{Direction, Solution};
///
/// let s = Solution::new(vec![1.0, 10.0])
///     .with_directions(vec![Direction::Minimize, Direction::Maximize])
///     .with_constraints(vec![0.0, -0.5]);
///
/// assert_eq!(s.number_of_objectives(), 2);
/// assert_eq!(s.canonical_objective(1), -10.0);
/// assert!(s.violates_constraints());
/// assert_eq!(s.constraint_violation(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    objectives: Vec<f64>,
    directions: Vec<Direction>,
    constraints: Vec<f64>,
    variables: Vec<Variable>,
}

impl Solution {
    /// Creates a solution with the given objective values, all minimized.
    pub fn new(objectives: impl Into<Vec<f64>>) -> Self {
        Self {
            objectives: objectives.into(),
            ..Self::default()
        }
    }

    /// Sets the direction of each objective.
    ///
    /// Objectives without an entry default to [`Direction::Minimize`].
    pub fn with_directions(mut self, directions: impl Into<Vec<Direction>>) -> Self {
        self.directions = directions.into();
        self
    }

    /// Sets the constraint values.
    pub fn with_constraints(mut self, constraints: impl Into<Vec<f64>>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Sets the decision variables.
    pub fn with_variables(mut self, variables: impl Into<Vec<Variable>>) -> Self {
        self.variables = variables.into();
        self
    }

    /// Objective values, in objective order.
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Value of objective `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.number_of_objectives()`.
    pub fn objective(&self, index: usize) -> f64 {
        self.objectives[index]
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Direction of objective `index`.
    pub fn direction(&self, index: usize) -> Direction {
        self.directions.get(index).copied().unwrap_or_default()
    }

    /// Value of objective `index` as if every objective were minimized.
    pub fn canonical_objective(&self, index: usize) -> f64 {
        self.direction(index).canonical(self.objectives[index])
    }

    pub fn constraints(&self) -> &[f64] {
        &self.constraints
    }

    pub fn number_of_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if any constraint value is non-zero.
    pub fn violates_constraints(&self) -> bool {
        self.constraints.iter().any(|&c| c != 0.0)
    }

    /// Aggregate constraint violation: the sum of absolute constraint values.
    pub fn constraint_violation(&self) -> f64 {
        self.constraints.iter().map(|c| c.abs()).sum()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Euclidean distance to `other` in objective space.
    pub fn objective_distance(&self, other: &Solution) -> f64 {
        self.objectives
            .iter()
            .zip(&other.objectives)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Distance to `other` in decision space.
    ///
    /// Sums [`Variable::distance`] over paired variables; each variable
    /// present in only one of the two solutions adds `1.0`.
    pub fn variable_distance(&self, other: &Solution) -> f64 {
        let paired: f64 = self
            .variables
            .iter()
            .zip(&other.variables)
            .map(|(a, b)| a.distance(b))
            .sum();
        paired + self.variables.len().abs_diff(other.variables.len()) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_minimize() {
        let s = Solution::new(vec![1.0, 2.0]);
        assert_eq!(s.direction(0), Direction::Minimize);
        assert_eq!(s.direction(1), Direction::Minimize);
        assert_eq!(s.canonical_objective(1), 2.0);
    }

    #[test]
    fn test_partial_directions() {
        let s = Solution::new(vec![1.0, 2.0, 3.0]).with_directions(vec![Direction::Maximize]);
        assert_eq!(s.direction(0), Direction::Maximize);
        assert_eq!(s.direction(2), Direction::Minimize);
        assert_eq!(s.canonical_objective(0), -1.0);
    }

    #[test]
    fn test_feasible_without_constraints() {
        let s = Solution::new(vec![0.0]);
        assert!(!s.violates_constraints());
        assert_eq!(s.constraint_violation(), 0.0);
    }

    #[test]
    fn test_constraint_violation_sums_magnitudes() {
        let s = Solution::new(vec![0.0]).with_constraints(vec![1.0, 0.0, -2.5]);
        assert!(s.violates_constraints());
        assert!((s.constraint_violation() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_objective_distance() {
        let a = Solution::new(vec![0.0, 0.0]);
        let b = Solution::new(vec![3.0, 4.0]);
        assert!((a.objective_distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_variable_distance() {
        let a = Solution::new(vec![0.0]).with_variables(vec![Variable::Real(1.0)]);
        let b = Solution::new(vec![0.0]).with_variables(vec![Variable::Real(3.0)]);
        assert!((a.variable_distance(&b) - 4.0).abs() < 1e-12);

        let c = Solution::new(vec![0.0]);
        assert_eq!(a.variable_distance(&c), 1.0);
        assert_eq!(c.variable_distance(&c.clone()), 0.0);
    }
}
