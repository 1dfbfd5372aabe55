use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wirecam::prelude::*;

const SCREEN: ScreenSize = ScreenSize::new(800, 600);

fn benchmark_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");

    let mut camera = Camera::default();
    camera.rotate(Vec3::new(0.2, -0.4, 0.1));

    for points in [8, 16, 32] {
        let sphere = WireframeMesh::sphere(points, 4).scale(2.0);
        group.bench_with_input(BenchmarkId::new("sphere", points), &sphere, |b, mesh| {
            b.iter(|| camera.project(black_box(mesh)).to_screen(SCREEN));
        });
    }

    // Camera inside the cube: every strut crosses the near plane.
    let cube = WireframeMesh::cube(Attributes::new()).scale(4.0);
    group.bench_function("cube_clipped", |b| {
        b.iter(|| camera.project(black_box(&cube)).to_screen(SCREEN));
    });

    group.finish();
}

fn benchmark_sphere_build(c: &mut Criterion) {
    c.bench_function("sphere_build_16x4", |b| {
        b.iter(|| WireframeMesh::sphere(black_box(16), black_box(4)));
    });
}

fn benchmark_frame(c: &mut Criterion) {
    let mut engine = Engine::new(SCREEN);
    engine.load_cube_scene();
    engine.add_object(SceneObject::new(WireframeMesh::sphere(16, 4)).with_spin(Vec3::new(0.0, 1.0, 0.0)));
    let idle = InputState::default();

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            engine.update(&idle, 1.0 / 60.0);
            engine.render();
        });
    });
}

criterion_group!(
    benches,
    benchmark_projection,
    benchmark_sphere_build,
    benchmark_frame
);
criterion_main!(benches);
