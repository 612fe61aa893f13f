//! Criterion benchmark for the scan worker pool.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lf2_bench::mixed_profile;
use lf2_corpus::{discover, scan_corpus, CorpusConfig};

/// Benchmark: scan 64 files with 1, 4 and auto workers.
fn bench_scan_corpus(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..64u64 {
        let path = dir.path().join(format!("c{i:02}.lf2"));
        std::fs::write(path, mixed_profile(i, 4 * 1024)).unwrap();
    }
    let paths = discover(dir.path()).unwrap();

    let mut group = c.benchmark_group("scan_corpus_64");
    for workers in [Some(1), Some(4), None] {
        let label = workers.map_or("auto".to_string(), |n: usize| n.to_string());
        let config = CorpusConfig {
            worker_count: workers,
            ..Default::default()
        };
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| black_box(scan_corpus(paths.clone(), &config).unwrap().len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan_corpus);
criterion_main!(benches);
