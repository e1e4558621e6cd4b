use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slotcar_core::{Body, BodyId, Pose, Vec3};
use slotcar_safety::{classify, StopZone};

fn make_bodies(count: usize, spacing: f64) -> Vec<Body> {
    let side = (count as f64).sqrt().ceil() as usize;
    let mut bodies = Vec::with_capacity(count);
    for i in 0..count {
        let x = 5.0 + (i % side) as f64 * spacing;
        let y = (i / side) as f64 * spacing;
        let name = match i % 10 {
            0 => format!("door_{i}"),
            1 => format!("lift_{i}"),
            _ => format!("robot_{i}"),
        };
        let mut body = Body::dynamic(i as u64 + 2, name, Vec3::planar(x, y));
        body.is_static = i % 7 == 0;
        bodies.push(body);
    }
    bodies
}

fn bench_monitor(c: &mut Criterion) {
    let zone = StopZone::new(1.0, 0.5);
    let pose = Pose::planar(0.0, 0.0, 0.0);

    let mut group = c.benchmark_group("slotcar-safety/first_blocker");

    for &n in &[100usize, 1_000usize, 10_000usize] {
        let bodies = make_bodies(n, 1.0);
        let infrastructure = classify(BodyId(1), &bodies);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| black_box(zone.first_blocker(&pose, &bodies, &infrastructure)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_monitor);
criterion_main!(benches);
