//! Criterion benchmarks for sampler_core engines.
//!
//! Measures raw integer, float and batch fill throughput of every engine,
//! and parallel fill scaling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sampler_core::engines::{
    streams, Engine, XorShift128, XorShift32, XorShift64, Xoroshiro128Plus,
};

fn bench_engine<E: Engine>(c: &mut Criterion, name: &str, engine: E) {
    let mut group = c.benchmark_group(name);

    let mut e = engine.clone();
    group.bench_function("next_uint", |b| b.iter(|| black_box(e.next_uint())));

    let mut e = engine.clone();
    group.bench_function("next_float", |b| b.iter(|| black_box(e.next_float())));

    let mut e = engine.clone();
    group.bench_function("next_double", |b| b.iter(|| black_box(e.next_double())));

    let mut e = engine.clone();
    group.bench_function("next_int_range", |b| {
        b.iter(|| black_box(e.next_int_range(black_box(-100), black_box(100))))
    });

    for size in [1_000usize, 100_000] {
        let mut buffer = vec![0.0f32; size];
        let mut e = engine.clone();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("fill_floats", size), &size, |b, _| {
            b.iter(|| e.fill_floats(black_box(&mut buffer)));
        });
    }

    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    bench_engine(c, "xorshift32", XorShift32::default());
    bench_engine(c, "xorshift64", XorShift64::default());
    bench_engine(c, "xorshift128", XorShift128::default());
    bench_engine(c, "xoroshiro128plus", Xoroshiro128Plus::default());
}

fn bench_parallel_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_fill");
    let base = Xoroshiro128Plus::default();

    for size in [100_000usize, 1_000_000] {
        let mut buffer = vec![0.0f64; size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| base.clone().fill_doubles(black_box(&mut buffer)));
        });
        group.bench_with_input(BenchmarkId::new("rayon_chunks", size), &size, |b, _| {
            b.iter(|| streams::par_fill_doubles(&base, black_box(&mut buffer), 16_384));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engines, bench_parallel_fill);
criterion_main!(benches);
