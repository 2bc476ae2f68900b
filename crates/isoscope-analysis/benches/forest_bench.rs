//! Isolation forest benchmarks.
//!
//! Benchmarks: ensemble fit and dataset scoring across dataset sizes.
//! Run with: cargo bench -p isoscope-analysis --bench forest_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use isoscope_analysis::forest::{AnomalyDetector, Dataset, ForestParams, IsolationForest};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Gaussian cloud of `n` observations with a few planted outliers.
fn gaussian_dataset(n: usize, dimensions: usize) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let rows = (0..n)
        .map(|i| {
            (0..dimensions)
                .map(|_| {
                    let v: f64 = rng.sample(StandardNormal);
                    if i % 97 == 0 {
                        v + 25.0
                    } else {
                        v
                    }
                })
                .collect()
        })
        .collect();
    Dataset::new(rows).unwrap()
}

fn forest_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_fit");
    group.sample_size(20);

    for size in [1_000, 10_000, 100_000] {
        let dataset = gaussian_dataset(size, 4);
        group.bench_with_input(BenchmarkId::new("fit", size), &size, |b, _| {
            b.iter(|| IsolationForest::fit(&dataset, 100, 256, Some(7)).unwrap());
        });
    }
    group.finish();
}

fn forest_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_score");
    group.sample_size(10);

    for size in [1_000, 10_000, 100_000] {
        let dataset = gaussian_dataset(size, 4);
        let forest = IsolationForest::fit(&dataset, 100, 256, Some(7)).unwrap();
        group.bench_with_input(BenchmarkId::new("score", size), &size, |b, _| {
            b.iter(|| forest.score(&dataset).unwrap());
        });
    }
    group.finish();
}

fn end_to_end_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    group.sample_size(10);

    let dataset = gaussian_dataset(10_000, 1);
    for threads in [1, 0] {
        let detector = AnomalyDetector::new(ForestParams {
            seed: Some(7),
            threads,
            ..Default::default()
        });
        let label = if threads == 0 { "global_pool" } else { "single_thread" };
        group.bench_function(label, |b| {
            b.iter(|| detector.detect(&dataset).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, forest_fit, forest_score, end_to_end_detect);
criterion_main!(benches);
