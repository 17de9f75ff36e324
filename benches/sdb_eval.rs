//! Benchmarks for SDB evaluation and sphere tracing
//!
//! Author: Moroya Sakamoto

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{DVec2, DVec3, DVec4};
use lenstrace::prelude::*;

fn singlet() -> Surface {
    let front = Surface::spherical_sag(50.0, 1.0, DVec3::ZERO).unwrap();
    let back = Surface::spherical_sag(-50.0, -1.0, DVec3::new(0.0, 0.0, 5.0)).unwrap();
    let aperture = Surface::infinite_cylinder(DVec2::ZERO, 12.5);
    Surface::intersection_of(vec![front, back, aperture]).unwrap()
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");
    let point = DVec4::new(0.5, 0.5, 0.5, 1.0);

    group.bench_function("sphere", |b| {
        let sphere = Surface::sphere(DVec3::ZERO, 1.0);
        b.iter(|| eval(black_box(&sphere), black_box(point)))
    });

    group.bench_function("plane", |b| {
        let plane = Surface::plane(DVec3::Z, 0.0);
        b.iter(|| eval(black_box(&plane), black_box(point)))
    });

    group.bench_function("spherical_sag", |b| {
        let cap = Surface::spherical_sag(50.0, 1.0, DVec3::ZERO).unwrap();
        b.iter(|| eval(black_box(&cap), black_box(point)))
    });

    group.bench_function("zemax_conic", |b| {
        let conic = Surface::zemax_conic(50.0, 12.5, 1.0, 1.0, vec![1e-6, -1e-9], DVec3::ZERO)
            .unwrap();
        b.iter(|| eval(black_box(&conic), black_box(point)))
    });

    group.finish();
}

fn bench_combinators(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinators");
    let point = DVec4::new(0.5, 0.5, 0.5, 1.0);

    group.bench_function("singlet", |b| {
        let lens = singlet();
        b.iter(|| eval(black_box(&lens), black_box(point)))
    });

    group.bench_function("singlet_identify", |b| {
        let lens = singlet();
        b.iter(|| identify(black_box(&lens), black_box(point)).d)
    });

    group.bench_function("singlet_traverse", |b| {
        let lens = singlet();
        b.iter(|| {
            let mut count = 0u32;
            let d = traverse(black_box(&lens), black_box(point), &mut |_, _| count += 1);
            (count, d)
        })
    });

    group.bench_function("lenslet_array", |b| {
        let array = Surface::rectangular_array(
            singlet().scaled(0.05),
            DVec2::splat(1.5),
            glam::UVec2::new(16, 16),
            DVec2::splat(-12.0),
        )
        .unwrap();
        b.iter(|| eval(black_box(&array), black_box(point)))
    });

    group.finish();
}

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace");
    let lens = singlet();
    let config = TraceConfig::new(50.0, 1e-9, 500);

    group.bench_function("axial_ray", |b| {
        b.iter(|| {
            sphere_trace(
                black_box(&lens),
                black_box(DVec4::new(0.0, 0.0, -10.0, 1.0)),
                black_box(DVec4::new(0.0, 0.0, 1.0, 0.0)),
                &config,
            )
        })
    });

    group.bench_function("fan_batch", |b| {
        let rays: Vec<Ray> = (0..64)
            .map(|i| {
                let y = -8.0 + 0.25 * f64::from(i);
                Ray::new(
                    DVec4::new(0.0, y, -10.0, 1.0),
                    DVec4::new(0.0, 0.0, 1.0, 0.0),
                )
            })
            .collect();
        b.iter(|| sphere_trace_batch(black_box(&lens), black_box(&rays), &config))
    });

    group.finish();
}

fn bench_shader(c: &mut Criterion) {
    c.bench_function("transpile_singlet", |b| {
        let lens = singlet();
        b.iter(|| GlslShader::transpile(black_box(&lens)).source.len())
    });
}

criterion_group!(
    benches,
    bench_primitives,
    bench_combinators,
    bench_trace,
    bench_shader
);
criterion_main!(benches);
