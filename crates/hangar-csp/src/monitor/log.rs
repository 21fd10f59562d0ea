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

use crate::{
    branching::decision::Decision,
    monitor::tree_search_monitor::TreeSearchMonitor,
    state::SearchState,
    stats::SearchStatistics,
};
use hangar_model::{model::Model, solution::Solution};
use log::info;
use std::time::{Duration, Instant};

/// Reports search progress through the `log` facade.
///
/// The clock is read only when `nodes_explored & clock_check_mask == 0`, and
/// a progress line is written at most once per `log_interval`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
        }
    }

    fn log_header(&self) {
        info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<12} | {:<10}",
            "Elapsed", "Nodes", "Depth", "Solutions", "Backtracks", "Wipe-outs"
        );
    }

    fn log_line(&mut self, state: &SearchState, statistics: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        info!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<12} | {:<10}",
            elapsed,
            statistics.nodes_explored,
            state.num_assigned(),
            statistics.solutions_found,
            statistics.backtracks,
            statistics.prunings_wipeout
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, _statistics: &SearchStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        info!("Search started on {}", model);
        self.log_header();
    }

    fn on_descend(&mut self, state: &SearchState, _decision: Decision, statistics: &SearchStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_solution_found(&mut self, _solution: &Solution, statistics: &SearchStatistics) {
        info!(
            "Solution {} found after {} nodes",
            statistics.solutions_found, statistics.nodes_explored
        );
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        info!(
            "Search finished: {} solution(s), {} nodes, {} backtracks in {:.2?}",
            statistics.solutions_found,
            statistics.nodes_explored,
            statistics.backtracks,
            self.start_time.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let m = LogMonitor::default();
        assert_eq!(m.log_interval, Duration::from_secs(1));
        assert_eq!(m.clock_check_mask, 4095);
        assert_eq!(
            m.to_string(),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
        assert_eq!(m.name(), "LogMonitor");
    }
}
