//! Benchmarks for CPU-side burst generation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use skyburst::burst::{generate, BurstShape, BurstSpec};
use skyburst::ReferenceMesh;

fn bench_spherical_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_spherical");

    for count in [400u32, 1400] {
        let spec = BurstSpec {
            count: Some(count),
            ..BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE)
        };
        group.bench_with_input(BenchmarkId::from_parameter(count), &spec, |b, spec| {
            let mut rng = SmallRng::seed_from_u64(1);
            b.iter(|| black_box(generate(spec, None, &mut rng)))
        });
    }

    group.finish();
}

fn bench_mesh_generation(c: &mut Criterion) {
    let mesh = ReferenceMesh::uv_sphere(32, 64, 1.0);
    let spec = BurstSpec {
        shape: BurstShape::ReferenceMesh,
        ..BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE)
    };

    c.bench_function("generate_mesh_2k", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| black_box(generate(&spec, Some(&mesh), &mut rng)))
    });
}

fn bench_mesh_construction(c: &mut Criterion) {
    c.bench_function("heart_mesh_800", |b| {
        b.iter(|| black_box(ReferenceMesh::heart(800, 1.0)))
    });
}

criterion_group!(
    benches,
    bench_spherical_generation,
    bench_mesh_generation,
    bench_mesh_construction
);
criterion_main!(benches);
