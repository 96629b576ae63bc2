//! Validation and statistics benchmarks.
//!
//! Measures the checks and the summarizer over generated tables of
//! increasing size.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use assay::{Column, Summarizer, Table, ValidationEngine};

const CITIES: &[&str] = &["NYC", "LA", "SF", "Chicago", "Boston"];

/// Build a table with an id, a text, an integer and a float column.
fn generate_table(rows: usize) -> Table {
    let ids = (0..rows).map(|i| Some((i % (rows / 2 + 1)).to_string())).collect();
    let cities = (0..rows)
        .map(|i| (i % 17 != 0).then(|| CITIES[i % CITIES.len()].to_string()))
        .collect();
    let ages = (0..rows).map(|i| Some((18 + i % 60).to_string())).collect();
    let scores = (0..rows)
        .map(|i| (i % 11 != 0).then(|| format!("{:.2}", (i as f64 * 7.3) % 100.0)))
        .collect();

    Table::new(vec![
        Column::inferred("id", ids),
        Column::inferred("city", cities),
        Column::inferred("age", ages),
        Column::inferred("score", scores),
    ])
    .expect("generated columns have equal length")
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let engine = ValidationEngine::new();

    for rows in [100, 1_000, 10_000] {
        let table = generate_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| engine.validate(black_box(table)))
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for rows in [100, 1_000, 10_000] {
        let table = generate_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| Summarizer::summarize(black_box(table)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validation, bench_statistics);
criterion_main!(benches);
