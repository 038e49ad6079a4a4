//! Crowding distance assignment for diversity preservation.

use crate::solution::EPS;

/// Crowding distance of each point in one front.
///
/// Measures how isolated each solution is within its front; higher is more
/// isolated. Computed in three steps:
///
/// 1. Points within [`EPS`] of an earlier point are duplicates and keep a
///    distance of `0.0`; only the first of each group takes part below.
/// 2. With fewer than three distinct points, every distinct point gets
///    `f64::INFINITY`.
/// 3. Otherwise, per objective: sort the distinct points, give the two
///    extremes `f64::INFINITY`, and add
///    `(next - prev) / (max - min)` to every interior point.
///
/// An objective whose range across the front is below [`EPS`] is skipped
/// entirely: it marks no boundary points and adds nothing.
///
/// # Complexity
///
/// O(m * n log n + n²) where m = number of objectives, n = front size
///
/// # Example
///
/// ```
/// use u_pareto::sorting::crowding_distance;
///
/// let front: [&[f64]; 3] = [&[1.0, 5.0], &[3.0, 3.0], &[5.0, 1.0]];
/// let distances = crowding_distance(&front);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance(objectives: &[&[f64]]) -> Vec<f64> {
    let n = objectives.len();
    let mut distances = vec![0.0f64; n];

    let mut unique: Vec<usize> = Vec::with_capacity(n);
    for i in 0..n {
        let duplicate = unique
            .iter()
            .any(|&u| euclidean_distance(objectives[i], objectives[u]) < EPS);
        if !duplicate {
            unique.push(i);
        }
    }

    let u = unique.len();
    if u < 3 {
        for &i in &unique {
            distances[i] = f64::INFINITY;
        }
        return distances;
    }

    let m = objectives[unique[0]].len();

    for obj_idx in 0..m {
        // Sort distinct points by this objective
        let mut order = unique.clone();
        order.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let min_val = objectives[order[0]][obj_idx];
        let max_val = objectives[order[u - 1]][obj_idx];
        let range = max_val - min_val;

        if range < EPS {
            continue;
        }

        distances[order[0]] = f64::INFINITY;
        distances[order[u - 1]] = f64::INFINITY;

        for k in 1..(u - 1) {
            let prev = objectives[order[k - 1]][obj_idx];
            let next = objectives[order[k + 1]][obj_idx];
            distances[order[k]] += (next - prev) / range;
        }
    }

    distances
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
