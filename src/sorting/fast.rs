//! Fast non-dominated sorting (Deb et al., 2002).
//!
//! 1. Precompute the N×N dominance sign matrix once
//! 2. Count, for every solution, how many others dominate it, and list the
//!    ones it dominates
//! 3. Solutions dominated by none form front 0; peel fronts by decrementing
//!    the counts of everything a front member dominates
//!
//! # Complexity
//!
//! O(m * n²) comparisons where m = number of objectives, n = population size

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dominance::DominanceComparator;
use crate::solution::Solution;

/// Dominance signs for every ordered pair, row-major: `matrix[i * n + j]` is
/// `-1` if `i` dominates `j`, `+1` if `j` dominates `i`, `0` otherwise.
///
/// Each later solution is compared against each earlier one, as in
/// insertion order, so an exact ε-box tie keeps the earlier solution.
pub(crate) fn dominance_matrix(
    comparator: &DominanceComparator,
    solutions: &[Arc<Solution>],
) -> Vec<i8> {
    let n = solutions.len();

    let row = |i: usize| -> Vec<i8> {
        ((i + 1)..n)
            .map(|j| -comparator.compare(&solutions[j], &solutions[i]).sign())
            .collect()
    };

    #[cfg(feature = "parallel")]
    let upper: Vec<Vec<i8>> = (0..n).into_par_iter().map(row).collect();
    #[cfg(not(feature = "parallel"))]
    let upper: Vec<Vec<i8>> = (0..n).map(row).collect();

    let mut matrix = vec![0i8; n * n];
    for (i, signs) in upper.iter().enumerate() {
        for (offset, &sign) in signs.iter().enumerate() {
            let j = i + 1 + offset;
            matrix[i * n + j] = sign;
            matrix[j * n + i] = -sign;
        }
    }
    matrix
}

/// Groups solution indices into fronts; each front is in ascending index
/// order.
pub(crate) fn fast_fronts(
    comparator: &DominanceComparator,
    solutions: &[Arc<Solution>],
) -> Vec<Vec<usize>> {
    let n = solutions.len();
    if n == 0 {
        return Vec::new();
    }

    let matrix = dominance_matrix(comparator, solutions);

    let mut domination_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut front_0 = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            match matrix[i * n + j] {
                -1 => dominates[i].push(j),
                1 => domination_count[i] += 1,
                _ => {}
            }
        }

        if domination_count[i] == 0 {
            front_0.push(i);
        }
    }

    let mut fronts = vec![front_0];
    loop {
        let Some(current) = fronts.last() else {
            break;
        };
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominates[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    fronts
}
