//! Solutions: objective vectors, optimization directions, constraints, and
//! decision variables.
//!
//! # Key Types
//!
//! - [`Solution`]: An externally evaluated candidate
//! - [`Direction`]: Minimize or maximize, per objective
//! - [`Variable`]: Decision variable used for decision-space duplicate checks

mod types;
mod variable;

pub use types::{Direction, Solution};
pub use variable::Variable;

/// Distance below which two solutions are considered coincident.
///
/// Applies to duplicate detection in non-dominated populations and to the
/// deduplication step of crowding distance. Independent of any ε-box ε.
pub const EPS: f64 = 1e-10;
