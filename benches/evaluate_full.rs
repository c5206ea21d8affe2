use coltype_eval::{
    ColumnTaskResults, DataType, EvalConfigBuilder, Instance, Sparsity, Vocabulary,
};
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use serde_jsonlines::json_lines;
use std::path::Path;

const COLUMN_TYPES: [&str; 8] = [
    "city",
    "country",
    "population",
    "name",
    "date",
    "price",
    "email",
    "description",
];

fn load_instances<P: AsRef<Path>>(path: P) -> Vec<Instance> {
    json_lines::<Instance, P>(path)
        .unwrap()
        .map(|r| r.unwrap())
        .collect::<Vec<_>>()
}

/// Tables of 2 to 9 columns whose predictions drop or add up to 4 columns. Deterministic, so
/// every run benches the same workload.
fn synthetic_instances(n: usize) -> Vec<Instance> {
    (0..n)
        .map(|i| {
            let width = 2 + i % 8;
            let true_labels: Vec<Option<String>> = (0..width)
                .map(|j| match (i + j) % 11 {
                    0 => None,
                    k => Some(String::from(COLUMN_TYPES[k % COLUMN_TYPES.len()])),
                })
                .collect();
            let kept = match i % 5 {
                0 => width + 1,
                1 => width.saturating_sub(1),
                2 => width.saturating_sub(2),
                3 => width.saturating_sub(4),
                _ => width,
            };
            let predicted_labels: Vec<String> = (0..kept)
                .map(|j| String::from(COLUMN_TYPES[(i * 3 + j) % COLUMN_TYPES.len()]))
                .collect();
            let data_types = (0..width)
                .map(|j| {
                    if (i + j) % 3 == 0 {
                        DataType::Numerical
                    } else {
                        DataType::NonNumerical
                    }
                })
                .collect();
            let sparsity = Sparsity::from_counts(i % 7, 10, width)
                .unwrap_or(Sparsity::new(0.0))
                .rounded(1);
            Instance::with_table_sparsity(true_labels, predicted_labels, data_types, sparsity)
        })
        .collect()
}

fn benchmark_fixture(c: &mut Criterion) {
    let instances = load_instances("./tests/data/instances.jsonl");
    let vocabulary = Vocabulary::new(COLUMN_TYPES).unwrap();
    let config = EvalConfigBuilder::default().build();
    c.bench_function("fixture_evaluation", |b| {
        b.iter(|| ColumnTaskResults::compute(&instances, &vocabulary, &config).unwrap())
    });
}

fn benchmark_synthetic_sequential(c: &mut Criterion) {
    let instances = synthetic_instances(2_000);
    let vocabulary = Vocabulary::new(COLUMN_TYPES).unwrap();
    let config = EvalConfigBuilder::default().max_adjustment(3).build();
    c.bench_function("synthetic_evaluation_sequential", |b| {
        b.iter(|| ColumnTaskResults::compute(&instances, &vocabulary, &config).unwrap())
    });
}

fn benchmark_synthetic_parallel(c: &mut Criterion) {
    let instances = synthetic_instances(2_000);
    let vocabulary = Vocabulary::new(COLUMN_TYPES).unwrap();
    let config = EvalConfigBuilder::default()
        .max_adjustment(3)
        .parallel(true)
        .build();
    c.bench_function("synthetic_evaluation_parallel", |b| {
        b.iter(|| ColumnTaskResults::compute(&instances, &vocabulary, &config).unwrap())
    });
}

criterion_group!(
    name=evaluation_benches;
    config = Criterion::default().sample_size(50).with_profiler(PProfProfiler::new(3000, Output::Flamegraph(None)));
    targets = benchmark_fixture,
    benchmark_synthetic_sequential,
    benchmark_synthetic_parallel
);
criterion_main!(evaluation_benches);
