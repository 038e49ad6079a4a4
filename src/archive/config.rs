//! Adaptive grid archive configuration.
//!
//! [`AdaptiveGridConfig`] holds the capacity and grid resolution of an
//! [`AdaptiveGridArchive`](super::AdaptiveGridArchive).

use super::nondominated::DuplicateMode;
use crate::error::{ParetoError, Result};

/// Configuration for the adaptive grid archive.
///
/// # Defaults
///
/// ```
/// use u_pareto::archive::AdaptiveGridConfig;
///
/// let config = AdaptiveGridConfig::default();
/// assert_eq!(config.capacity, 100);
/// assert_eq!(config.divisions, 256);
/// assert_eq!(config.bisections(), 8);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pareto::archive::AdaptiveGridConfig;
///
/// let config = AdaptiveGridConfig::default()
///     .with_capacity(50)
///     .with_bisections(4);
/// assert_eq!(config.divisions, 16);
/// assert!(config.validate(3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveGridConfig {
    /// Maximum number of members kept by the archive.
    pub capacity: usize,

    /// Number of equal-width divisions along each objective axis.
    ///
    /// The grid has `divisions ^ objectives` cells, which must fit in a
    /// `u32` cell index.
    pub divisions: u32,

    /// Duplicate policy applied during the non-dominated scan.
    pub duplicate_mode: DuplicateMode,
}

impl Default for AdaptiveGridConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            divisions: 256,
            duplicate_mode: DuplicateMode::AllowDuplicates,
        }
    }
}

impl AdaptiveGridConfig {
    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of divisions per objective.
    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions;
        self
    }

    /// Sets the number of divisions to `2 ^ bisections`.
    pub fn with_bisections(mut self, bisections: u32) -> Self {
        self.divisions = 2u32.saturating_pow(bisections);
        self
    }

    /// Sets the duplicate policy.
    pub fn with_duplicate_mode(mut self, mode: DuplicateMode) -> Self {
        self.duplicate_mode = mode;
        self
    }

    /// Number of bisections equivalent to the configured divisions,
    /// rounded to the nearest integer.
    pub fn bisections(&self) -> u32 {
        (self.divisions as f64).log2().round() as u32
    }

    /// Largest bisection count whose grid fits a `u32` cell index for the
    /// given number of objectives.
    pub fn maximum_bisections(objectives: usize) -> u32 {
        if objectives == 0 {
            return 0;
        }
        ((u32::BITS - 1) as usize / objectives) as u32
    }

    /// Total number of grid cells, `divisions ^ objectives`.
    pub fn cell_count(&self, objectives: usize) -> Result<u32> {
        u32::try_from(objectives)
            .ok()
            .and_then(|m| self.divisions.checked_pow(m))
            .ok_or(ParetoError::GridTooLarge {
                divisions: self.divisions,
                objectives,
                max_bisections: Self::maximum_bisections(objectives),
            })
    }

    /// Validates the configuration for a problem with `objectives`
    /// objectives.
    pub fn validate(&self, objectives: usize) -> Result<()> {
        if self.capacity == 0 {
            return Err(ParetoError::InvalidCapacity);
        }
        if self.divisions == 0 {
            return Err(ParetoError::InvalidDivisions);
        }
        if objectives == 0 {
            return Err(ParetoError::NoObjectives);
        }
        self.cell_count(objectives).map(|_| ())
    }
}
