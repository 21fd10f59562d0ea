// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Partitioned Parallel Solver
//!
//! Runs several `BacktrackingSolver`s side by side on disjoint parts of the
//! search space and merges their answers.
//!
//! ## Partitioning
//!
//! The first variable, `loc(first aircraft, 0)`, has its locations split into
//! contiguous, ascending chunks. Worker `i` explores only the schedules whose
//! first variable takes a value of chunk `i`. Because the engine tries values
//! in ascending order, concatenating the workers' solutions in chunk order
//! reproduces the single-threaded sequence exactly.
//!
//! ## Early stopping
//!
//! Every worker runs with the full solution cap and its own stop flag. When
//! a worker reaches the cap on its own, or when the finished workers of a
//! leading prefix together reach it, nothing found by later workers can
//! make it into the merged output and their flags are raised. An external
//! interrupt flag stops every worker at once.
//!
//! ## Usage
//!
//! ```rust
//! use hangar_csp::config::SolverConfig;
//! use hangar_model::{fleet::AircraftSpec, model::ModelBuilder};
//! use hangar_solver::solver::ParallelSolver;
//!
//! let mut builder = ModelBuilder::new(1, 3);
//! builder
//!     .set_horizon(2)
//!     .fill_parking()
//!     .add_aircraft(AircraftSpec::standard(1, 0, 0));
//! let model = builder.build().unwrap();
//!
//! let solver = ParallelSolver::new(SolverConfig::new().with_solution_limit(None).with_threads(2));
//! let outcome = solver.solve(&model);
//! assert_eq!(outcome.len(), 9);
//! ```

use hangar_csp::{
    config::SolverConfig,
    monitor::{composite::CompositeTreeSearchMonitor, interrupt::InterruptMonitor},
    result::{SolveOutcome, TerminationReason},
    solver::BacktrackingSolver,
    stats::SearchStatistics,
};
use hangar_model::{index::LocationIndex, model::Model};
use log::{debug, info};
use std::{
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

/// How a worker's run ended, as far as stopping the others is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WorkerStatus {
    Exhausted(usize),
    Capped,
    Aborted,
}

/// Shared bookkeeping that decides which workers are still useful.
struct WorkerBoard<'a> {
    solution_limit: Option<usize>,
    stop_flags: &'a [AtomicBool],
    finished: Mutex<Vec<Option<WorkerStatus>>>,
}

impl<'a> WorkerBoard<'a> {
    fn new(solution_limit: Option<usize>, stop_flags: &'a [AtomicBool]) -> Self {
        Self {
            solution_limit,
            stop_flags,
            finished: Mutex::new(vec![None; stop_flags.len()]),
        }
    }

    /// Records the end of worker `worker` and stops every worker whose
    /// solutions can no longer reach the merged output.
    fn report(&self, worker: usize, outcome: &SolveOutcome) {
        let status = match outcome.termination() {
            TerminationReason::Exhausted => WorkerStatus::Exhausted(outcome.len()),
            TerminationReason::Capped => WorkerStatus::Capped,
            TerminationReason::Aborted(_) => WorkerStatus::Aborted,
        };

        let mut finished = self
            .finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        finished[worker] = Some(status);

        if status == WorkerStatus::Capped {
            self.stop_after(worker);
        }

        let Some(limit) = self.solution_limit else {
            return;
        };
        let mut total = 0usize;
        for (index, entry) in finished.iter().enumerate() {
            match entry {
                Some(WorkerStatus::Exhausted(count)) => {
                    total = total.saturating_add(*count);
                    if total >= limit {
                        self.stop_after(index);
                        return;
                    }
                }
                Some(WorkerStatus::Capped) => {
                    self.stop_after(index);
                    return;
                }
                Some(WorkerStatus::Aborted) | None => return,
            }
        }
    }

    fn stop_after(&self, worker: usize) {
        for flag in &self.stop_flags[worker + 1..] {
            flag.store(true, Ordering::Relaxed);
        }
    }
}

/// Splits `0..num_locations` into at most `workers` contiguous, non-empty,
/// ascending chunks whose sizes differ by at most one.
pub fn partition_first_domain(num_locations: usize, workers: usize) -> Vec<Vec<LocationIndex>> {
    let chunks = workers.min(num_locations).max(1);
    let base = num_locations / chunks;
    let extra = num_locations % chunks;

    let mut partition = Vec::with_capacity(chunks);
    let mut start = 0;
    for chunk in 0..chunks {
        let len = base + usize::from(chunk < extra);
        partition.push((start..start + len).map(LocationIndex::new).collect());
        start += len;
    }
    partition
}

/// Enumerates schedules with one `BacktrackingSolver` per worker thread.
#[derive(Debug, Clone, Default)]
pub struct ParallelSolver {
    config: SolverConfig,
}

impl ParallelSolver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `model` with `config.threads` workers.
    pub fn solve(&self, model: &Model) -> SolveOutcome {
        let never = AtomicBool::new(false);
        self.solve_with_interrupt(model, &never)
    }

    /// Like `solve`; raising `interrupt` from another thread aborts every
    /// worker.
    pub fn solve_with_interrupt(&self, model: &Model, interrupt: &AtomicBool) -> SolveOutcome {
        let serial = BacktrackingSolver::new(self.config.clone());
        let workers = self.config.threads.min(model.num_locations());

        if workers <= 1 || model.num_variables() == 0 || self.config.solution_limit == Some(0) {
            debug!("Solving {} on a single thread", model);
            return serial.solve(model, InterruptMonitor::new(interrupt));
        }

        let start_time = Instant::now();
        let chunks = partition_first_domain(model.num_locations(), workers);
        let stop_flags: Vec<AtomicBool> = chunks.iter().map(|_| AtomicBool::new(false)).collect();
        let board = WorkerBoard::new(self.config.solution_limit, &stop_flags);

        info!(
            "Solving {} with {} workers ({})",
            model,
            chunks.len(),
            self.config.heuristic
        );

        let outcomes = std::thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .iter()
                .enumerate()
                .map(|(worker, chunk)| {
                    let serial = &serial;
                    let board = &board;
                    let stop_flag = &stop_flags[worker];
                    scope.spawn(move || {
                        let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
                        monitor.add_monitor(InterruptMonitor::new(stop_flag));
                        monitor.add_monitor(InterruptMonitor::new(interrupt));

                        let outcome = serial.solve_partition(model, monitor, chunk);
                        debug!(
                            "Worker {} ({} first values) finished: {}",
                            worker,
                            chunk.len(),
                            outcome
                        );
                        board.report(worker, &outcome);
                        outcome
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect::<Vec<_>>()
        });

        self.merge(outcomes, start_time)
    }

    /// Concatenates the worker outcomes in chunk order, up to the cap or
    /// the first aborted worker.
    fn merge(&self, outcomes: Vec<SolveOutcome>, start_time: Instant) -> SolveOutcome {
        let mut statistics = SearchStatistics::default();
        for outcome in &outcomes {
            statistics.merge(outcome.statistics());
        }

        let mut solutions = Vec::new();
        let mut termination = TerminationReason::Exhausted;
        for outcome in outcomes {
            let reason = outcome.termination().clone();
            solutions.extend(outcome.into_solutions());

            if let Some(limit) = self.config.solution_limit
                && solutions.len() >= limit
            {
                solutions.truncate(limit);
                termination = TerminationReason::Capped;
                break;
            }
            if reason.is_aborted() {
                termination = reason;
                break;
            }
        }

        // Surplus solutions of stopped workers are not reported.
        statistics.solutions_found = solutions.len() as u64;
        statistics.set_total_time(start_time.elapsed());

        info!(
            "Parallel search finished ({}) with {} solution(s) in {:.2?}",
            termination,
            solutions.len(),
            statistics.time_total
        );
        SolveOutcome::new(solutions, termination, statistics)
    }
}
