use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use driftfield::core::{
    CameraConfig, DrawMode, ElementConfig, FieldConfig, InfluenceFollow, MorphCloud,
    PointCloud, PointLayerConfig, Pulse, Scene, SceneConfig, Shape,
};
use driftfield::geometry;
use driftfield::math::{Bounds3, Rgba};

/// Deterministic cloud spread through the hero bounds, velocities in the
/// hero speed range.
fn build_cloud(count: usize) -> PointCloud {
    let positions: Vec<Vec3> = (0..count)
        .map(|i| {
            Vec3::new(
                ((i as f32 * 0.731) % 50.0) - 25.0,
                ((i as f32 * 0.413) % 40.0) - 20.0,
                ((i as f32 * 0.227) % 20.0) - 15.0,
            )
        })
        .collect();
    let velocities: Vec<Vec3> = (0..count)
        .map(|i| {
            Vec3::new(
                ((i as f32 * 0.0013) % 0.004) - 0.002,
                ((i as f32 * 0.0017) % 0.004) - 0.002,
                ((i as f32 * 0.0009) % 0.002) - 0.001,
            )
        })
        .collect();
    let bounds = Bounds3::new(Vec3::new(-25.0, -20.0, -15.0), Vec3::new(25.0, 20.0, 5.0)).unwrap();
    PointCloud::new(positions, velocities, bounds).unwrap()
}

/// Benchmark: advection at the preset sizes plus a stress size
fn bench_advect(c: &mut Criterion) {
    let mut group = c.benchmark_group("advect");

    for count in [220, 300, 10000].iter() {
        let mut cloud = build_cloud(*count);

        group.bench_with_input(BenchmarkId::new("points", count), count, |b, _| {
            b.iter(|| {
                cloud.advect();
                black_box(cloud.positions().len())
            })
        });
    }

    group.finish();
}

/// Benchmark: every point wrapping every step (worst case for the bounds
/// checks)
fn bench_advect_all_wrapping(c: &mut Criterion) {
    let count = 1000;
    let positions: Vec<Vec3> = (0..count).map(|_| Vec3::new(24.9, 19.9, 4.9)).collect();
    let velocities: Vec<Vec3> = (0..count).map(|_| Vec3::new(0.2, 0.2, 0.2)).collect();
    let bounds = Bounds3::new(Vec3::new(-25.0, -20.0, -15.0), Vec3::new(25.0, 20.0, 5.0)).unwrap();
    let mut cloud = PointCloud::new(positions, velocities, bounds).unwrap();

    c.bench_function("advect_wrap_heavy", |b| {
        b.iter(|| {
            cloud.advect();
            black_box(cloud.positions()[0])
        })
    });
}

/// Benchmark: shimmer displacement over the icosphere vertex base
fn bench_morph_update(c: &mut Criterion) {
    let base = geometry::tessellate(Shape::Icosahedron {
        radius: 3.0,
        subdivisions: 1,
    })
    .vertices;
    let mut cloud = MorphCloud::new(
        base,
        Vec3::new(0.08, 0.08, 0.06),
        Vec3::new(3.0, 2.0, 1.5),
    );
    let mut phase = 0.0f32;

    c.bench_function("morph_update_icosphere", |b| {
        b.iter(|| {
            phase += 0.008;
            cloud.update(phase, 1.0);
            black_box(cloud.positions().len())
        })
    });
}

/// Benchmark: one full step of a hero-sized scene (220 drifting points plus
/// a torus knot element)
fn bench_scene_step(c: &mut Criterion) {
    let config = SceneConfig {
        name: "bench".into(),
        clock_step: 0.005,
        clear_color: Rgba::from_hex(0x0a0c14, 1.0),
        camera: CameraConfig {
            fov_y_deg: 60.0,
            distance: 28.0,
            near: 0.1,
            far: 1000.0,
        },
        point_layers: vec![PointLayerConfig {
            field: FieldConfig::Drift {
                count: 220,
                min: [-25.0, -20.0, -15.0],
                max: [25.0, 20.0, 5.0],
                speed: [0.002, 0.002, 0.001],
                seed: Some(11),
            },
            color: Rgba::from_hex(0x4a5068, 0.6),
            size: 0.12,
            twinkle: None,
        }],
        elements: vec![ElementConfig {
            shape: Shape::TorusKnot {
                radius: 4.2,
                tube: 1.1,
                tubular_segments: 140,
                radial_segments: 18,
            },
            mode: DrawMode::Wireframe,
            color: Rgba::from_hex(0x6366f1, 0.18),
            position: [0.0, 0.0, 0.0],
            spin: [0.003, 0.006, 0.002],
            follow: InfluenceFollow {
                position: [1.5, -1.2],
                rotation: [0.0, 0.0],
                smoothing: 0.02,
            },
            scale_pulse: Some(Pulse {
                amplitude: 0.04,
                frequency: 1.0,
            }),
            opacity_pulse: None,
        }],
    };
    let mut scene = Scene::from_config(&config).unwrap();
    scene.start();

    c.bench_function("scene_step_hero_sized", |b| {
        b.iter(|| {
            scene.step();
            black_box(scene.phase())
        })
    });
}

/// Benchmark: tessellation cost for each element shape
fn bench_tessellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate");

    group.bench_function("torus_knot_140x18", |b| {
        b.iter(|| {
            black_box(geometry::tessellate(Shape::TorusKnot {
                radius: 4.2,
                tube: 1.1,
                tubular_segments: 140,
                radial_segments: 18,
            }))
        })
    });

    group.bench_function("icosphere_detail_1", |b| {
        b.iter(|| {
            black_box(geometry::tessellate(Shape::Icosahedron {
                radius: 3.0,
                subdivisions: 1,
            }))
        })
    });

    group.bench_function("uv_sphere_16x16", |b| {
        b.iter(|| {
            black_box(geometry::tessellate(Shape::Sphere {
                radius: 12.0,
                sectors: 16,
                stacks: 16,
            }))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_advect,
    bench_advect_all_wrapping,
    bench_morph_update,
    bench_scene_step,
    bench_tessellation,
);

criterion_main!(benches);
