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

//! Fan-out monitor
//!
//! `CompositeTreeSearchMonitor` forwards every event to its children in
//! insertion order. `search_command` short-circuits on the first
//! non-`Continue` answer, so stricter stop conditions belong first.

use crate::{
    branching::decision::Decision,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    state::SearchState,
    stats::SearchStatistics,
};
use hangar_model::{model::Model, solution::Solution};

#[derive(Default)]
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl<'a> FromIterator<Box<dyn TreeSearchMonitor + 'a>> for CompositeTreeSearchMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        for monitor in &mut self.monitors {
            let command = monitor.search_command(state, statistics);
            if !matches!(command, SearchCommand::Continue) {
                return command;
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: &SearchState, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, statistics);
        }
    }

    fn on_prune(&mut self, state: &SearchState, reason: PruneReason, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_decisions_enqueued(state, count, statistics);
        }
    }

    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_descend(state, decision, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &SearchState, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_model::model::ModelBuilder;
    use std::{cell::Cell, rc::Rc};

    struct Counting {
        name: &'static str,
        entered: Rc<Cell<usize>>,
        polled: Rc<Cell<usize>>,
        command: SearchCommand,
    }

    impl TreeSearchMonitor for Counting {
        fn name(&self) -> &str {
            self.name
        }

        fn on_enter_search(&mut self, _model: &Model, _statistics: &SearchStatistics) {
            self.entered.set(self.entered.get() + 1);
        }

        fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

        fn search_command(
            &mut self,
            _state: &SearchState,
            _statistics: &SearchStatistics,
        ) -> SearchCommand {
            self.polled.set(self.polled.get() + 1);
            self.command.clone()
        }
    }

    #[test]
    fn test_fans_out_and_short_circuits() {
        let mut b = ModelBuilder::new(1, 1);
        b.set_horizon(1).fill_parking();
        let m = b.build().unwrap();
        let state = SearchState::new(&m);
        let stats = SearchStatistics::default();

        let entered = Rc::new(Cell::new(0));
        let polled_last = Rc::new(Cell::new(0));

        let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
        composite.add_monitor(Counting {
            name: "stop",
            entered: entered.clone(),
            polled: Rc::new(Cell::new(0)),
            command: SearchCommand::Terminate("first".into()),
        });
        composite.add_monitor(Counting {
            name: "never-polled",
            entered: entered.clone(),
            polled: polled_last.clone(),
            command: SearchCommand::Continue,
        });
        assert_eq!(composite.len(), 2);
        assert!(!composite.is_empty());

        composite.on_enter_search(&m, &stats);
        assert_eq!(entered.get(), 2);

        assert_eq!(
            composite.search_command(&state, &stats),
            SearchCommand::Terminate("first".into())
        );
        assert_eq!(polled_last.get(), 0);
        assert_eq!(format!("{:?}", composite), r#"["stop", "never-polled"]"#);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut b = ModelBuilder::new(1, 1);
        b.set_horizon(1).fill_parking();
        let m = b.build().unwrap();
        let state = SearchState::new(&m);
        let mut composite = CompositeTreeSearchMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&state, &SearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
