use deck_presentation::{elastic_translation, DeckConfig, DragStateMachine};
use deck_testing::TestHost;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DRAG_STEPS: &[usize] = &[16, 64, 256];

fn bench_elastic_curve(c: &mut Criterion) {
    let config = DeckConfig::default();
    c.bench_function("elastic_translation_sweep", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for step in 0..480 {
                if let Some(offset) = elastic_translation(black_box(step as f32 * 0.5), &config) {
                    total += offset;
                }
            }
            black_box(total)
        })
    });
}

fn bench_state_machine(c: &mut Criterion) {
    let config = DeckConfig::default();
    c.bench_function("drag_state_machine_updates", |b| {
        b.iter(|| {
            let mut machine = DragStateMachine::new(config);
            machine.begin();
            for step in 0..230 {
                black_box(machine.update(step as f32, true));
            }
            machine.end()
        })
    });
}

fn bench_drag_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_and_settle");
    for &steps in DRAG_STEPS {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter_with_setup(
                || {
                    let host = TestHost::new(375.0, 667.0);
                    host.present();
                    host
                },
                |host| {
                    host.press();
                    for step in 0..steps {
                        host.drag_to(step as f32 * 200.0 / steps as f32);
                    }
                    host.release_at(200.0);
                    black_box(host.settle())
                },
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_elastic_curve, bench_state_machine, bench_drag_loop);
criterion_main!(benches);
