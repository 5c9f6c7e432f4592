//! Benchmarks for the per-frame update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use sparkfield::prelude::*;
use sparkfield::particle::{Trail, TrailPoint};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// An engine holding roughly `count` particles spread over all modes.
fn populated(count: usize) -> Engine {
    let mut engine = Engine::with_seed(
        Config {
            emission: EmissionRates::NONE,
            trail_length: 10,
            ..Default::default()
        },
        1,
    );
    let mut i = 0;
    while engine.len() < count {
        let mode = Mode::ALL[i % Mode::ALL.len()];
        engine.update_config(&ConfigPatch::new().mode(mode));
        let x = (i * 37 % WIDTH as usize) as f32;
        let y = (i * 53 % (HEIGHT as usize / 2)) as f32;
        engine.burst_at(Vec2::new(x, y));
        i += 1;
    }
    engine
}

fn frame() -> FrameInput {
    FrameInput {
        pointer: Vec2::new(WIDTH as f32 * 0.5, HEIGHT as f32 * 0.5),
        pointer_held: true,
        time_ms: 1000.0,
    }
}

fn bench_update_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_raster");
    group.sample_size(20);

    for count in [100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut raster = Raster::new(WIDTH, HEIGHT);
            b.iter_batched(
                || populated(count),
                |mut engine| {
                    engine.update(&mut raster, &frame());
                    black_box(engine)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_update_recorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_simulation_only");

    for count in [1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut surface = Recorder::new(WIDTH as f32, HEIGHT as f32);
            b.iter_batched(
                || populated(count),
                |mut engine| {
                    engine.update(&mut surface, &frame());
                    surface.take();
                    black_box(engine)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_trail_push(c: &mut Criterion) {
    c.bench_function("trail_push", |b| {
        let mut trail = Trail::default();
        let mut y = 0.0f32;
        b.iter(|| {
            y += 1.0;
            trail.push(
                TrailPoint {
                    position: Vec2::new(0.0, y),
                    life: 1.0,
                },
                black_box(10),
            );
        })
    });
}

criterion_group!(benches, bench_update_raster, bench_update_recorder, bench_trail_push);
criterion_main!(benches);
