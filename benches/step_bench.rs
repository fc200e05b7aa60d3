use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use roll_engine::surface::QuadraticSheet;
use roll_engine::{Ball, SimulationWorld, Vector3, Wall};

const RADIUS: f32 = 0.5;

/// Builds a boxed-in world with `side * side` balls on a grid, each with a
/// seeded random velocity
fn build_world(side: u32) -> SimulationWorld {
    let mut rng = StdRng::seed_from_u64(42);
    let mut world = SimulationWorld::new(Arc::new(QuadraticSheet::flat(0.0)));

    let extent = side as f32 * 1.5 + 2.0;
    world.register_wall(
        Wall::new(Vector3::new(extent, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)).unwrap(),
    );
    world.register_wall(
        Wall::new(Vector3::new(-extent, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap(),
    );
    world.register_wall(
        Wall::new(Vector3::new(0.0, extent, 0.0), Vector3::new(0.0, -1.0, 0.0)).unwrap(),
    );
    world.register_wall(
        Wall::new(Vector3::new(0.0, -extent, 0.0), Vector3::new(0.0, 1.0, 0.0)).unwrap(),
    );

    for ix in 0..side {
        for iy in 0..side {
            let x = (ix as f32 - side as f32 / 2.0) * 3.0;
            let y = (iy as f32 - side as f32 / 2.0) * 3.0;
            let velocity = Vector3::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), 0.0);
            world.register_ball(
                Ball::new(Vector3::new(x, y, RADIUS), velocity, 1.0, RADIUS).unwrap(),
            );
        }
    }

    world
}

fn bench_step_once(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_once");

    for side in [2u32, 4, 6] {
        let balls = side * side;
        group.bench_function(format!("{} balls", balls), |b| {
            let mut world = build_world(side);
            b.iter(|| black_box(world.step_once(1.0 / 60.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step_once);
criterion_main!(benches);
