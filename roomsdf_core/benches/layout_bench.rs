//! Criterion benchmarks for padding and chunk slicing.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use roomsdf_core::{ChunkLayout, DenseGrid, ResolutionConfig};

/// A room-sized high-res field with a smooth ramp.
fn make_room_field() -> DenseGrid<f32> {
    DenseGrid::from_fn([150, 60, 170], |[x, y, z]| (x + y + z) as f32 * 0.01)
}

fn bench_padding(c: &mut Criterion) {
    let config = ResolutionConfig::default();
    let field = make_room_field();
    let layout = ChunkLayout::new(field.shape(), &config).unwrap();

    let mut group = c.benchmark_group("padding");
    group.throughput(Throughput::Elements(field.len() as u64));
    group.bench_function("pad_highres_room", |b| {
        b.iter(|| black_box(field.padded(black_box(layout.highres_shape), 1.0).unwrap()))
    });
    group.finish();
}

fn bench_chunk_slicing(c: &mut Criterion) {
    let config = ResolutionConfig::default();
    let field = make_room_field();
    let layout = ChunkLayout::new(field.shape(), &config).unwrap();
    let padded = field.padded(layout.highres_shape, 1.0).unwrap();

    c.bench_function("slice_all_tiles", |b| {
        b.iter(|| {
            for tile in layout.tiles() {
                black_box(
                    padded
                        .slice(tile.highres_origin, tile.highres_extent)
                        .unwrap(),
                );
            }
        })
    });
}

criterion_group!(benches, bench_padding, bench_chunk_slicing);
criterion_main!(benches);
