//! Benchmark for noise generation performance.
//!
//! Run with: cargo bench --package cubeworld_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cubeworld_procedural::noise::{ValueNoise, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = ValueNoise::new(WorldSeed::new(42));

    c.bench_function("single_noise2d_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.noise2d(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = ValueNoise::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise2d_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000u32 {
                let x = f64::from(i % 1000) * 0.1;
                let y = f64::from(i / 1000) * 0.1;
                black_box(noise.noise2d(x, y));
            }
        });
    });

    group.finish();
}

fn benchmark_fbm(c: &mut Criterion) {
    let noise = ValueNoise::new(WorldSeed::new(42));

    c.bench_function("fbm2d_4_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.fbm2d(black_box(x), black_box(x * 0.7), 4, 0.5))
        });
    });

    c.bench_function("fbm3d_4_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.fbm3d(black_box(x), black_box(x * 0.7), black_box(x * 0.3), 4, 0.5))
        });
    });
}

criterion_group!(benches, benchmark_single_sample, benchmark_million_samples, benchmark_fbm);
criterion_main!(benches);
