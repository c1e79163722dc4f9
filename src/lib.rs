//! Parallel numerical reduction via per-worker partial sums.
//!
//! A fixed iteration count is partitioned into contiguous blocks, one per
//! worker thread. Each worker accumulates a private partial sum over its
//! block, and the controlling thread combines the slots in worker-index
//! order once every worker has joined. The demo binary uses this to
//! approximate pi by midpoint-rule integration of `4 / (1 + x^2)` over
//! `[0, 1]`:
//!
//! Run with: cargo run --bin pi_midpoint

use std::thread;
use thiserror::Error;

// =============================================================================
// Workload configuration
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("total_steps must be at least 1, got {got}")]
    InvalidTotalSteps { got: usize },

    #[error("worker_count must be at least 1, got {got}")]
    InvalidWorkerCount { got: usize },
}

/// Immutable description of one reduction: how many midpoint-rule steps to
/// evaluate and how many workers share them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    total_steps: usize,
    worker_count: usize,
}

impl Workload {
    pub fn new(total_steps: usize, worker_count: usize) -> Result<Self, WorkloadError> {
        if total_steps == 0 {
            return Err(WorkloadError::InvalidTotalSteps { got: total_steps });
        }
        if worker_count == 0 {
            return Err(WorkloadError::InvalidWorkerCount { got: worker_count });
        }
        Ok(Self {
            total_steps,
            worker_count,
        })
    }

    /// Sizes the worker pool to the number of logical CPUs.
    pub fn with_available_workers(total_steps: usize) -> Result<Self, WorkloadError> {
        Self::new(total_steps, num_cpus::get())
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Width of one midpoint-rule sub-interval.
    pub fn step(&self) -> f64 {
        1.0 / self.total_steps as f64
    }

    /// Partitions `[0, total_steps)` into one contiguous block per worker.
    ///
    /// Block size is `total_steps / worker_count`; the last worker's upper
    /// bound is clamped to `total_steps` so an uneven division never drops
    /// the tail iterations.
    pub fn blocks(&self) -> Vec<Block> {
        let block_size = self.total_steps / self.worker_count;
        (0..self.worker_count)
            .map(|worker| {
                let start = worker * block_size;
                let end = if worker + 1 == self.worker_count {
                    self.total_steps
                } else {
                    (worker + 1) * block_size
                };
                Block { worker, start, end }
            })
            .collect()
    }
}

/// Half-open iteration range `[start, end)` owned exclusively by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub worker: usize,
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// =============================================================================
// Parallel reduction
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    #[error("worker {worker} panicked before writing its partial sum")]
    WorkerPanicked { worker: usize },
}

/// Outcome of one reduction: the per-worker slots plus the final scaled value.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// One slot per worker, indexed by worker id, written exactly once.
    pub partial_sums: Vec<f64>,
    /// `step * unscaled_sum()`, i.e. the midpoint-rule integral.
    pub value: f64,
}

impl Reduction {
    /// Sum of the partial slots in worker-index order, before scaling by the
    /// step width.
    pub fn unscaled_sum(&self) -> f64 {
        self.partial_sums.iter().sum()
    }
}

pub struct ParallelReducer;

impl ParallelReducer {
    /// Runs `f` at the midpoint of every sub-interval, one scoped thread per
    /// worker, then reduces the partial sums in worker-index order.
    ///
    /// The scope exit is the barrier: no slot is read until every worker has
    /// joined. Workers write disjoint slots, so the compute phase needs no
    /// locking.
    pub fn reduce<F>(workload: &Workload, f: F) -> Result<Reduction, ReduceError>
    where
        F: Fn(f64) -> f64 + Sync,
    {
        let step = workload.step();
        let blocks = workload.blocks();
        let f = &f;

        let mut partial_sums = vec![0.0_f64; workload.worker_count()];
        let mut first_failure = None;

        thread::scope(|s| {
            let handles: Vec<_> = blocks
                .iter()
                .map(|&block| {
                    let handle = s.spawn(move || {
                        let mut local_sum = 0.0;
                        for i in block.start..block.end {
                            let x = (i as f64 + 0.5) * step;
                            local_sum += f(x);
                        }
                        local_sum
                    });
                    (block.worker, handle)
                })
                .collect();

            // Join every handle even after a failure, so the scope never
            // re-raises a panic we already recorded.
            for (worker, handle) in handles {
                match handle.join() {
                    Ok(local_sum) => partial_sums[worker] = local_sum,
                    Err(_) => {
                        if first_failure.is_none() {
                            first_failure = Some(ReduceError::WorkerPanicked { worker });
                        }
                    }
                }
            }
        });

        if let Some(failure) = first_failure {
            return Err(failure);
        }

        let unscaled: f64 = partial_sums.iter().sum();
        Ok(Reduction {
            value: step * unscaled,
            partial_sums,
        })
    }

    /// Single-threaded reference over the same range, same evaluation order
    /// as worker 0 of a one-worker reduction.
    pub fn reduce_sequential<F>(workload: &Workload, f: F) -> Reduction
    where
        F: Fn(f64) -> f64,
    {
        let step = workload.step();
        let mut sum = 0.0;
        for i in 0..workload.total_steps() {
            let x = (i as f64 + 0.5) * step;
            sum += f(x);
        }
        Reduction {
            value: step * sum,
            partial_sums: vec![sum],
        }
    }
}

// =============================================================================
// Midpoint-rule integrand for pi
// =============================================================================

/// `4 / (1 + x^2)`, whose integral over `[0, 1]` is pi.
pub fn pi_integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint-rule approximation of pi for the given workload.
pub fn approximate_pi(workload: &Workload) -> Result<f64, ReduceError> {
    Ok(ParallelReducer::reduce(workload, pi_integrand)?.value)
}

// =============================================================================
// Tests
// =============================================================================
