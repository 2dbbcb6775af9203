//! Recipe preparation and application benchmarks.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use reciprs::{
    DataFrame, Recipe, Selector, Series, StepDummy, StepLog, StepNormalize, StepOther,
};

/// Create a synthetic housing-style dataset.
fn create_dataset(n_samples: usize) -> DataFrame {
    // Simple LCG random generator for reproducibility
    let mut rng_state: u64 = 42;
    let mut rand_f64 = move || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (rng_state >> 33) as f64 / (u32::MAX as f64)
    };

    let neighborhoods = ["north", "south", "east", "west", "harbor"];
    let kinds = ["condo", "house", "townhouse"];

    let price: Vec<f64> = (0..n_samples).map(|_| 100_000.0 + 400_000.0 * rand_f64()).collect();
    let area: Vec<f64> = (0..n_samples).map(|_| 40.0 + 200.0 * rand_f64()).collect();
    let neighborhood: Vec<&str> = (0..n_samples)
        .map(|i| neighborhoods[i % neighborhoods.len()])
        .collect();
    let kind: Vec<&str> = (0..n_samples).map(|i| kinds[i % kinds.len()]).collect();

    let mut df = DataFrame::new();
    df.add_column("price", Series::from_numeric(&price)).unwrap();
    df.add_column("area", Series::from_numeric(&area)).unwrap();
    df.add_column("neighborhood", Series::from_strings(&neighborhood))
        .unwrap();
    df.add_column("kind", Series::from_strings(&kind)).unwrap();
    df
}

fn build_recipe() -> Recipe {
    Recipe::new()
        .with_outcome("price")
        .add_step(StepLog::new(Selector::column("area")))
        .add_step(StepOther::new(Selector::column("neighborhood")).with_threshold(0.1))
        .add_step(StepDummy::new(Selector::NominalPredictors))
        .add_step(StepNormalize::new(Selector::column("area")))
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    for size in [1_000, 10_000] {
        let data = create_dataset(size);
        let recipe = build_recipe();
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| recipe.prepare(data).unwrap());
        });
    }
    group.finish();
}

fn bench_bake(c: &mut Criterion) {
    let mut group = c.benchmark_group("bake");
    for size in [1_000, 10_000] {
        let data = create_dataset(size);
        let prepared = build_recipe().prepare(&data).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| prepared.bake(Some(data)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prepare, bench_bake);
criterion_main!(benches);
