//! Criterion benchmarks for u-pareto sorting and archiving.
//!
//! Uses random points on and around a linear front to measure pure
//! algorithm overhead independent of any problem.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_pareto::archive::{
    AdaptiveGridArchive, AdaptiveGridConfig, EpsilonBoxDominanceArchive, NondominatedPopulation,
};
use u_pareto::population::Population;
use u_pareto::solution::Solution;
use u_pareto::sorting::{NondominatedSorting, SortingAlgorithm};

// ===========================================================================
// Inputs
// ===========================================================================

/// Points scattered above the simplex `sum(x) = 1`, so that populations
/// spread over several fronts.
fn random_solutions(n: usize, objectives: usize, seed: u64) -> Vec<Solution> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let raw: Vec<f64> = (0..objectives).map(|_| rng.random_range(0.0..1.0)).collect();
            let sum: f64 = raw.iter().sum::<f64>().max(1e-9);
            let offset = rng.random_range(0.0..0.5);
            Solution::new(raw.iter().map(|v| v / sum + offset).collect::<Vec<f64>>())
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nondominated_sorting");
    group.sample_size(10);

    for (n, m) in [(100usize, 2usize), (500, 2), (500, 3), (1000, 3)] {
        let population: Population = random_solutions(n, m, 42).into_iter().collect();

        for algorithm in [SortingAlgorithm::Naive, SortingAlgorithm::Fast] {
            let sorting = NondominatedSorting::default().with_algorithm(algorithm);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", algorithm), format!("n{}_m{}", n, m)),
                &population,
                |b, p| b.iter(|| black_box(sorting.evaluate(black_box(p)))),
            );
        }
    }
    group.finish();
}

fn bench_archive_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_insertion");
    group.sample_size(10);

    for n in [1000usize, 5000] {
        let solutions = random_solutions(n, 3, 7);

        group.bench_with_input(BenchmarkId::new("nondominated", n), &solutions, |b, s| {
            b.iter(|| {
                let mut archive = NondominatedPopulation::default();
                archive.add_all(s.iter().cloned());
                black_box(archive.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("epsilon_box", n), &solutions, |b, s| {
            b.iter(|| {
                let Ok(mut archive) = EpsilonBoxDominanceArchive::uniform(0.05) else {
                    return 0;
                };
                archive.add_all(s.iter().cloned());
                black_box(archive.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("adaptive_grid", n), &solutions, |b, s| {
            let config = AdaptiveGridConfig::default().with_capacity(100);
            b.iter(|| {
                let Ok(mut archive) = AdaptiveGridArchive::new(3, config.clone()) else {
                    return 0;
                };
                archive.add_all(s.iter().cloned());
                black_box(archive.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sorting, bench_archive_insertion);
criterion_main!(benches);
