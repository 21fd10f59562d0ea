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
    monitor::tree_search_monitor::{SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::SearchStatistics,
};
use hangar_model::model::Model;
use std::time::{Duration, Instant};

/// Terminates the search once `time_limit` has elapsed since it started.
///
/// The clock is read only on steps where `steps & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Option<Instant>,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    pub fn new(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            clock_check_mask,
        }
    }

    pub fn with_default_mask(time_limit: Duration) -> Self {
        Self::new(time_limit, 0x3FFF)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl TreeSearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &SearchStatistics) {
        self.start_time = Some(Instant::now());
    }

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _state: &SearchState,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        if (statistics.steps & self.clock_check_mask) == 0
            && let Some(start) = self.start_time
            && start.elapsed() > self.time_limit
        {
            return SearchCommand::Terminate(format!(
                "Time limit of {:.2?} exceeded",
                self.time_limit
            ));
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_model::model::ModelBuilder;

    fn model() -> Model {
        let mut b = ModelBuilder::new(1, 1);
        b.set_horizon(1).fill_parking();
        b.build().unwrap()
    }

    #[test]
    fn test_zero_limit_terminates_on_checked_step() {
        let m = model();
        let state = SearchState::new(&m);
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO, 0);
        let stats = SearchStatistics::default();
        monitor.on_enter_search(&m, &stats);
        std::thread::sleep(Duration::from_millis(2));
        assert!(matches!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_continues_before_start_and_within_limit() {
        let m = model();
        let state = SearchState::new(&m);
        let stats = SearchStatistics::default();
        let mut monitor = TimeLimitMonitor::with_default_mask(Duration::from_secs(3600));
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        monitor.on_enter_search(&m, &stats);
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
        assert_eq!(monitor.time_limit(), Duration::from_secs(3600));
    }

    #[test]
    fn test_clock_is_skipped_off_mask() {
        let m = model();
        let state = SearchState::new(&m);
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO, 0xFF);
        let stats = SearchStatistics {
            steps: 1,
            ..Default::default()
        };
        monitor.on_enter_search(&m, &stats);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(monitor.search_command(&state, &stats), SearchCommand::Continue);
    }
}
