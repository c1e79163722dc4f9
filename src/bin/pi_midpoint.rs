//! Midpoint-rule approximation of pi on a fixed worker pool.
//!
//! Integrates 4 / (1 + x^2) over [0, 1] with 100,000 steps split across 10
//! workers, then reports each worker's partial sum and the reduced value.
//!
//! Run with: cargo run --bin pi_midpoint

use colored::Colorize;
use parallel_reduction::{pi_integrand, ParallelReducer, Workload};
use std::process;
use std::time::Instant;

const NUM_STEPS: usize = 100_000;
const NUM_WORKERS: usize = 10;

fn main() {
    let workload = match Workload::new(NUM_STEPS, NUM_WORKERS) {
        Ok(workload) => workload,
        Err(err) => {
            eprintln!("{} {err}", "configuration error:".red());
            process::exit(1);
        }
    };

    let start = Instant::now();
    let reduction = match ParallelReducer::reduce(&workload, pi_integrand) {
        Ok(reduction) => reduction,
        Err(err) => {
            eprintln!("{} {err}", "reduction failed:".red());
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    for _ in 0..workload.worker_count() {
        println!("Num of threads = {}", workload.worker_count());
    }

    for (worker, local_sum) in reduction.partial_sums.iter().enumerate() {
        println!("Local sum for thread {worker} is {local_sum:.6}");
    }

    let headline = format!("Pi after integration under the area: {:.6}", reduction.value);
    println!("{}", headline.green().bold());
    println!("Time taken by the multi threading: {:.6}", elapsed.as_secs_f64());
}
