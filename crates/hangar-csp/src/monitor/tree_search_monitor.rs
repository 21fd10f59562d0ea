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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait used to observe and steer the
//! backtracking engine. Callbacks follow the search lifecycle:
//!
//! enter → step → {decisions | descend | prune | backtrack} → solution → exit
//!
//! A monitor stops the search by answering `search_command` with
//! `SearchCommand::Terminate`; the engine then ends the run as aborted and
//! reports the reason. Every callback receives the running statistics.
//!
//! Methods take `&mut self`; a monitor belongs to exactly one engine.

use crate::{
    branching::decision::Decision, state::SearchState, stats::SearchStatistics,
};
use hangar_model::{model::Model, solution::Solution};

/// What the engine should do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for abandoning a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The candidate assignment breaks a rule.
    Infeasible,
    /// Forward checking left some variable without values.
    DomainWipeout,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::DomainWipeout => write!(f, "DomainWipeout"),
        }
    }
}

pub trait TreeSearchMonitor {
    fn name(&self) -> &str;

    /// Called once before the first step.
    fn on_enter_search(&mut self, model: &Model, statistics: &SearchStatistics);

    /// Called once when the run ends, whatever the reason.
    fn on_exit_search(&mut self, statistics: &SearchStatistics);

    /// Polled at the top of every step.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &SearchStatistics) {}

    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &SearchStatistics,
    ) {
    }

    /// Called after `decision` was committed.
    fn on_descend(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &SearchStatistics) {}

    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &SearchStatistics) {}
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
