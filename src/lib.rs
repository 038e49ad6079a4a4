//! Non-dominated archiving and Pareto sorting for multi-objective
//! evolutionary optimization.
//!
//! Provides the data structures that keep track of the best trade-offs found
//! by a multi-objective search:
//!
//! - **Dominance**: Pareto, constraint-aware, and ε-box dominance
//!   comparators over [`Solution`](solution::Solution)s with per-objective
//!   minimize/maximize directions.
//! - **Populations**: ordered, identity-aware collections of shared
//!   solutions.
//! - **Archives**: an unbounded non-dominated population, an ε-box dominance
//!   archive that keeps one solution per ε-box and counts ε-improvements,
//!   and a bounded adaptive grid archive that evicts from its most crowded
//!   cell.
//! - **Sorting**: naive and fast non-dominated sorting with crowding
//!   distance, plus a self-ranking population with NSGA-II truncation.
//!
//! # Architecture
//!
//! This crate contains no problem-specific concepts. Solutions are evaluated
//! elsewhere and handed over as objective (and optionally constraint and
//! variable) values; the search loop that produces them is the caller's.
//! All components are single-threaded and synchronous. The `parallel`
//! feature only parallelizes the dominance matrix of fast sorting.
//!
//! Diagnostics go through the [`log`] facade; install any logger to see
//! grid rebuilds, evictions, and sorting summaries.
//!
//! # Example
//!
//! ```
//! use u_pareto::archive::{AdaptiveGridArchive, AdaptiveGridConfig};
//! use u_pareto::solution::Solution;
//!
//! let config = AdaptiveGridConfig::default()
//!     .with_capacity(2)
//!     .with_bisections(2);
//! let mut archive = AdaptiveGridArchive::new(2, config).unwrap();
//!
//! archive.add(Solution::new(vec![0.0, 4.0]));
//! archive.add(Solution::new(vec![4.0, 0.0]));
//! archive.add(Solution::new(vec![2.0, 2.0]));
//!
//! assert!(archive.len() <= 2);
//! assert_eq!(archive.total_density(), archive.len());
//! ```

pub mod archive;
pub mod constraint;
pub mod dominance;
pub mod error;
pub mod population;
pub mod solution;
pub mod sorting;

pub use error::{ParetoError, Result};
