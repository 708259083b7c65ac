use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

use fibtm::{encode, par_sweep, programs, sweep, TapeMachine, DEFAULT_MAX_STEPS};

const WARM_UP_TIME_MS: u64 = 500;
const MAX_N: usize = 10;

criterion_group!(benches, benchmark_single_run, benchmark_sweep);
criterion_main!(benches);

fn benchmark_single_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Single Run");
    let config = programs::fibonacci().unwrap();

    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(20);

    for n in [1, 5, 8, 10] {
        let input = encode(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| {
                let mut machine = TapeMachine::new(&config, black_box(input)).unwrap();
                machine.run(DEFAULT_MAX_STEPS)
            })
        });
    }

    group.finish();
}

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bench Sweep");
    let config = programs::fibonacci().unwrap();

    group.warm_up_time(Duration::from_millis(WARM_UP_TIME_MS));
    group.sample_size(10);

    group.bench_function("Sweep sequential", |b| {
        b.iter(|| sweep(&config, 1..=MAX_N, DEFAULT_MAX_STEPS).unwrap())
    });
    group.bench_function("Sweep parallel", |b| {
        b.iter(|| par_sweep(&config, 1..=MAX_N, DEFAULT_MAX_STEPS).unwrap())
    });

    group.finish();
}
