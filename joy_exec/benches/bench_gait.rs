//! # Gait Synthesis Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::joy::JoystickState;
use joy_lib::gait_ctrl::{synthesize, GaitConfig};

fn gait_benchmark(c: &mut Criterion) {
    // A sweep of joystick states covering both pitch branches and full yaw
    let states: Vec<JoystickState> = (0..100)
        .map(|i| {
            let t = i as f64 * 0.1;
            JoystickState::new(
                vec![0.0, t.sin(), 1.0, (0.5 * t).cos(), (0.3 * t).sin(), 1.0, 0.0, 0.0],
                vec![],
            )
        })
        .collect();

    for gait in [
        GaitConfig::FishStandard,
        GaitConfig::FishAdvanced,
        GaitConfig::TurtleStandard,
    ]
    .iter()
    {
        c.bench_function(&format!("synthesize_{}", gait), |b| {
            b.iter(|| {
                for joy in states.iter() {
                    black_box(synthesize(*gait, black_box(joy)));
                }
            })
        });
    }
}

criterion_group!(benches, gait_benchmark);
criterion_main!(benches);
