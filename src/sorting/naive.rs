//! Front peeling by repeated non-dominated insertion.
//!
//! Each round runs the non-dominated population insertion scan (duplicates
//! allowed) over the solutions not yet ranked. The survivors form the next
//! front and leave the pool.
//!
//! # Complexity
//!
//! O(k * m * n²) where k = number of fronts

use std::sync::Arc;

use crate::archive::nondominated::scan;
use crate::archive::DuplicateMode;
use crate::dominance::DominanceComparator;
use crate::solution::Solution;

/// Groups solution indices into fronts; each front is in ascending index
/// order.
pub(crate) fn naive_fronts(
    comparator: &DominanceComparator,
    solutions: &[Arc<Solution>],
) -> Vec<Vec<usize>> {
    let mut remaining: Vec<usize> = (0..solutions.len()).collect();
    let mut fronts = Vec::new();

    while !remaining.is_empty() {
        let mut front: Vec<usize> = Vec::new();

        for &candidate in &remaining {
            let insertion = scan(
                comparator,
                DuplicateMode::AllowDuplicates,
                &solutions[candidate],
                front.iter().map(|&k| solutions[k].as_ref()),
            );

            if let Some(insertion) = insertion {
                for &position in insertion.dominated.iter().rev() {
                    front.remove(position);
                }
                front.push(candidate);
            }
        }

        front.sort_unstable();

        let mut in_front = vec![false; solutions.len()];
        for &i in &front {
            in_front[i] = true;
        }
        remaining.retain(|&i| !in_front[i]);

        fronts.push(front);
    }

    fronts
}
