//! Lanai Benchmarks
//!
//! Benchmarks for the Lanai pattern index, implemented with the Criterion
//! framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BatchSize, BenchmarkId,
    Criterion, SamplingMode, Throughput,
};
use serde_json::{json, Value};
use std::time::Duration;

use lanai_lib::data_structures::LanaiIndex;

/// Patterns shaped like routing rules: a shared `type`, a few optional fields.
fn rule_patterns(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| match i % 4 {
            0 => json!({"type": format!("t{}", i % 50)}),
            1 => json!({"type": format!("t{}", i % 50), "region": format!("r{}", i % 7)}),
            2 => json!({"type": format!("t{}", i % 50), "meta": {"tier": i % 3}}),
            _ => json!({"type": format!("t{}", i % 50), "id": i, "tags": ["a", "b"]}),
        })
        .collect()
}

fn filled_index(patterns: &[Value]) -> LanaiIndex<usize> {
    let mut index = LanaiIndex::new();
    for (i, pattern) in patterns.iter().enumerate() {
        index.add(pattern, i).expect("benchmark pattern is valid");
    }
    index
}

/// Benchmark the Lanai pattern index
fn bench_lanai_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanai_index");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    // Bulk add with different index sizes
    for size in [100, 1000, 10_000].iter() {
        let patterns = rule_patterns(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("add", size), &patterns, |b, patterns| {
            b.iter(|| black_box(filled_index(patterns)));
        });
    }

    // Match against indexes of growing size
    for size in [100, 1000, 10_000].iter() {
        let index = filled_index(&rule_patterns(*size));
        let query = json!({
            "type": "t7",
            "region": "r3",
            "id": 7,
            "meta": {"tier": 1, "owner": "x"},
            "tags": ["a", "b", "c"],
        });

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("match", size), &query, |b, query| {
            b.iter(|| black_box(index.matches(query)));
        });
    }

    // Exact lookup
    group.bench_function("get", |b| {
        let patterns = rule_patterns(1000);
        let index = filled_index(&patterns);

        let mut position = 0;
        b.iter(|| {
            let pattern = &patterns[position % patterns.len()];
            position += 1;
            black_box(index.get(pattern));
        });
    });

    // Remove every pattern from a full index
    group.throughput(Throughput::Elements(1000));
    group.bench_function("remove_all", |b| {
        let patterns = rule_patterns(1000);
        b.iter_batched(
            || filled_index(&patterns),
            |mut index| {
                for (i, pattern) in patterns.iter().enumerate() {
                    black_box(index.remove(pattern, Some(&i)));
                }
                index
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_lanai_index
}

criterion_main!(benches);
