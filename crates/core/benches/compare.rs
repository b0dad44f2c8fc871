//! Benchmarks: differencer table fill and two-level text comparison.
//!
//! Run with: cargo bench --package linediff-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use linediff_core::{calculate_difference, compare_strings, CompareConfig, SliceView};

// ── Data generators ──

/// Source-like text with `lines` lines.
fn gen_source(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("    let value_{i} = compute({i}, \"item {i}\");\n"))
        .collect()
}

/// Same text with every `stride`-th line edited.
fn gen_edited(lines: usize, stride: usize) -> String {
    (0..lines)
        .map(|i| {
            if i % stride == 0 {
                format!("    let value_{i} = compute_v2({i}, \"item {i}\");\n")
            } else {
                format!("    let value_{i} = compute({i}, \"item {i}\");\n")
            }
        })
        .collect()
}

fn bench_differencer(c: &mut Criterion) {
    let mut group = c.benchmark_group("differencer");
    for size in [64usize, 256, 1024] {
        let a: Vec<u32> = (0..size as u32).map(|i| i % 7).collect();
        let b: Vec<u32> = (0..size as u32).map(|i| (i * 3) % 7).collect();
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| {
                calculate_difference(SliceView::new(black_box(&a), black_box(&b)), Vec::new(), usize::MAX)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_compare_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_strings");
    for lines in [100usize, 1000] {
        let old = gen_source(lines);
        let new = gen_edited(lines, 10);
        group.throughput(Throughput::Bytes(old.len() as u64));
        for parallel in [false, true] {
            let config = CompareConfig {
                parallel,
                ..Default::default()
            };
            let id = format!("{lines}_lines_{}", if parallel { "par" } else { "seq" });
            group.bench_function(id, |bench| {
                bench.iter(|| compare_strings(black_box(&old), black_box(&new), &config).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_differencer, bench_compare_strings);
criterion_main!(benches);
