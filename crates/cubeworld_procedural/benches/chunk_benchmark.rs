//! Benchmark for chunk generation performance.
//!
//! Run with: cargo bench --package cubeworld_procedural --bench chunk_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cubeworld_procedural::{ChunkId, TerrainGenerator, TerrainParameters};

fn benchmark_single_chunk(c: &mut Criterion) {
    let gen = TerrainGenerator::new(TerrainParameters::with_seed(42));

    c.bench_function("single_chunk_generation", |b| {
        let mut coord = 0i32;
        b.iter(|| {
            coord = coord.wrapping_add(1);
            black_box(gen.generate(ChunkId::new(coord, coord / 2)))
        });
    });
}

fn benchmark_streaming_disk(c: &mut Criterion) {
    let gen = TerrainGenerator::new(TerrainParameters::with_seed(42));

    let mut group = c.benchmark_group("chunk_grid");
    group.sample_size(10);

    // Render distance 12 loads roughly a 25x25 disk
    group.throughput(Throughput::Elements(25 * 25));
    group.bench_function("25x25_chunks", |b| {
        b.iter(|| {
            for z in -12..=12 {
                for x in -12..=12 {
                    black_box(gen.generate(ChunkId::new(x, z)));
                }
            }
        });
    });

    group.finish();
}

fn benchmark_column_sampling(c: &mut Criterion) {
    let gen = TerrainGenerator::default();

    c.bench_function("column_height_sample", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(gen.sample_column(black_box(x), black_box(x / 3)))
        });
    });
}

criterion_group!(benches, benchmark_single_chunk, benchmark_streaming_disk, benchmark_column_sampling);
criterion_main!(benches);
