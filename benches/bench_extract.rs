use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use planeseg_core::PointCloud;
use planeseg_segmentation::{extract_planes_seeded, RansacParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Floor, two walls and a ceiling of a 10 x 10 x 3 room, with light noise.
fn room(points_per_surface: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(points_per_surface * 4);
    for _ in 0..points_per_surface {
        let noise = rng.gen_range(-0.005f32..0.005);
        points.push([rng.gen_range(0.0f32..10.0), rng.gen_range(0.0f32..10.0), noise]);
        points.push([rng.gen_range(0.0f32..10.0), rng.gen_range(0.0f32..10.0), 3.0 + noise]);
        points.push([noise, rng.gen_range(0.0f32..10.0), rng.gen_range(0.0f32..3.0)]);
        points.push([rng.gen_range(0.0f32..10.0), noise, rng.gen_range(0.0f32..3.0)]);
    }
    PointCloud::from_points(&points)
}

fn bench_extract_planes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_4_planes");
    group.sample_size(10);
    let params = RansacParams {
        iterations: 200,
        distance_threshold: 0.02,
        ..RansacParams::default()
    };
    for per_surface in [2_500, 25_000] {
        let cloud = room(per_surface, 42);
        group.bench_with_input(
            BenchmarkId::new("planeseg", cloud.len()),
            &cloud.len(),
            |b, _| b.iter(|| extract_planes_seeded(&cloud, 4, &params, 42)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_extract_planes);
criterion_main!(benches);
