//! Benchmarks for logmerge chunking and merging operations.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench merging -- chunking`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use logmerge::config::MergeConfig;
use logmerge::core::{Record, TimestampPattern, chunk, merge, merge_lines};

use chrono::{Duration, NaiveDate};

// =============================================================================
// Test Data Generators
// =============================================================================

fn pattern() -> TimestampPattern {
    TimestampPattern::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})",
        "%Y-%m-%d %H:%M:%S%.3f",
    )
    .unwrap()
}

/// Interleaves `hosts` chronological streams the way concatenated host files
/// look: each host covers the same time range.
fn generate_lines(records: usize, hosts: usize) -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let per_host = records / hosts;
    let mut lines = Vec::with_capacity(records * 2);

    for host in 0..hosts {
        for i in 0..per_host {
            let ts = start + Duration::milliseconds((i * 250 + host * 7) as i64);
            lines.push(format!(
                "{} INFO [host{}] request {} completed",
                ts.format("%Y-%m-%d %H:%M:%S%.3f"),
                host,
                i
            ));
            if i % 4 == 0 {
                lines.push(format!("  at handler (src/server.rs:{})", i % 300));
                lines.push(String::new());
            }
        }
    }
    lines
}

// =============================================================================
// Chunking Benchmarks
// =============================================================================

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunking");
    let pattern = pattern();

    for size in [1_000_usize, 10_000, 100_000] {
        let lines = generate_lines(size, 4);
        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lines, |b, lines| {
            b.iter(|| {
                let records: Vec<Record> = chunk(black_box(lines).iter(), &pattern).collect();
                black_box(records)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Merge Benchmarks
// =============================================================================

fn bench_merge(c: &mut Criterion) {
    let pattern = pattern();

    for (name, config) in [
        ("merge_parallel", MergeConfig::new()),
        ("merge_sequential", MergeConfig::sequential()),
    ] {
        let mut group = c.benchmark_group(name);
        for size in [1_000_usize, 10_000, 100_000] {
            let records: Vec<Record> = chunk(generate_lines(size, 4), &pattern).collect();
            group.throughput(Throughput::Elements(records.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
                b.iter(|| {
                    let merged = merge(black_box(records.clone()), &pattern, &config).unwrap();
                    black_box(merged)
                });
            });
        }
        group.finish();
    }
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let pattern = pattern();

    for hosts in [1_usize, 4, 16] {
        let lines = generate_lines(50_000, hosts);
        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hosts), &lines, |b, lines| {
            b.iter(|| {
                let result = merge_lines(black_box(lines).iter(), &pattern, &MergeConfig::new()).unwrap();
                black_box(result)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_chunking, bench_merge, bench_full_pipeline);

criterion_main!(benches);
