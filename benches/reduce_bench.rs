// Criterion comparison of sequential and parallel midpoint reduction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parallel_reduction::{pi_integrand, ParallelReducer, Workload};

fn benchmark_reduce_implementations(c: &mut Criterion) {
    let mut group = c.benchmark_group("midpoint_reduce");

    let total_steps = 1_000_000;

    let sequential = Workload::new(total_steps, 1).expect("valid workload");
    group.bench_with_input(
        BenchmarkId::new("sequential", total_steps),
        &sequential,
        |b, workload| b.iter(|| ParallelReducer::reduce_sequential(black_box(workload), pi_integrand)),
    );

    for workers in [2, 4, 8] {
        let workload = Workload::new(total_steps, workers).expect("valid workload");
        group.bench_with_input(
            BenchmarkId::new("parallel", workers),
            &workload,
            |b, workload| b.iter(|| ParallelReducer::reduce(black_box(workload), pi_integrand)),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_reduce_implementations);
criterion_main!(benches);
