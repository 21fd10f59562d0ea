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

//! Backtracking search over `loc(aircraft, slot)` variables.
//!
//! `Solutions` is the search engine. It owns one partial assignment
//! (`SearchState`), the variable domains, a trail that records every
//! mutation, and a frame-structured stack of untried decisions. Iterating it
//! runs the search until the next complete, consistent schedule is found and
//! yields it; the search resumes from the same point on the next call. The
//! sequence is finite, fused, and ends when the space is exhausted, the
//! solution cap is reached, or a monitor terminates the run.
//!
//! Each step of the main loop either
//! - ends the run (monitor command, or nothing left at the root),
//! - backtracks one level when the current level has no decision left, or
//! - pops the next decision, checks every rule whose scope it completes, and
//!   descends into it.
//!
//! Descending assigns the variable, derives the aircraft's task state for
//! the next slot and, with forward checking enabled, removes from the
//! domains of the still unassigned variables every value that now breaks a
//! rule. Because the slot-local rules are monotone, a removed value can
//! never become valid again below this node, and an emptied domain proves
//! that no extension exists. Without forward checking the same values are
//! rejected one by one when they are tried, so both modes enumerate the
//! same solutions in the same order.
//!
//! `BacktrackingSolver` wraps the engine with a `SolverConfig`: it picks
//! the decision builder, installs a time limit monitor when configured, and
//! collects the solutions into a `SolveOutcome`.

use crate::{
    branching::{
        chronological::ChronologicalBuilder,
        decision::{Decision, DecisionBuilder},
        mrv::MostConstrainedBuilder,
    },
    config::{Heuristic, SolverConfig},
    constraints::{compatibility_ok, placement_is_consistent},
    domain::Domains,
    monitor::{
        composite::CompositeTreeSearchMonitor,
        no_op::NoOperationMonitor,
        time_limit::TimeLimitMonitor,
        tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    },
    result::{SolveOutcome, TerminationReason},
    stack::SearchStack,
    state::SearchState,
    stats::SearchStatistics,
    trail::SearchTrail,
};
use hangar_model::{
    index::{AircraftIndex, LocationIndex, VariableIndex},
    model::Model,
    solution::Solution,
};
use log::debug;
use std::{iter::FusedIterator, time::Instant};

/// Lazily enumerates the schedules of `model` in `(slot, aircraft)` variable
/// order with locations tried in `(row, col)` order, stopping after
/// `max_solutions`.
///
/// An empty fleet or a zero horizon yields exactly one empty schedule;
/// `max_solutions == 0` yields nothing.
pub fn solve(
    model: &Model,
    max_solutions: usize,
) -> Solutions<'_, ChronologicalBuilder, NoOperationMonitor> {
    Solutions::new(
        model,
        ChronologicalBuilder::preallocated(model.num_locations()),
        NoOperationMonitor::new(),
    )
    .with_solution_limit(Some(max_solutions))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Ready,
    Running,
    Finished,
}

/// The search engine, exposed as an iterator over solutions.
pub struct Solutions<'a, B, M> {
    model: &'a Model,
    builder: B,
    monitor: M,
    solution_limit: Option<usize>,
    forward_checking: bool,
    first_variable_values: Option<Vec<LocationIndex>>,
    state: SearchState,
    domains: Domains,
    trail: SearchTrail,
    stack: SearchStack,
    scratch: Vec<(VariableIndex, LocationIndex)>,
    statistics: SearchStatistics,
    start_time: Instant,
    phase: Phase,
    termination: Option<TerminationReason>,
    emitted: usize,
}

impl<'a, B, M> Solutions<'a, B, M>
where
    B: DecisionBuilder,
    M: TreeSearchMonitor,
{
    /// Creates an engine without solution cap and with forward checking.
    /// Nothing is searched until the first call to `next`.
    pub fn new(model: &'a Model, builder: B, monitor: M) -> Self {
        let num_variables = model.num_variables();
        let num_locations = model.num_locations();

        Self {
            model,
            builder,
            monitor,
            solution_limit: None,
            forward_checking: true,
            first_variable_values: None,
            state: SearchState::new(model),
            domains: Domains::new(num_variables, num_locations),
            trail: SearchTrail::preallocated(num_variables),
            stack: SearchStack::preallocated(num_locations, num_variables),
            scratch: Vec::with_capacity(num_locations),
            statistics: SearchStatistics::default(),
            start_time: Instant::now(),
            phase: Phase::Ready,
            termination: None,
            emitted: 0,
        }
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: Option<usize>) -> Self {
        self.solution_limit = limit;
        self
    }

    #[inline]
    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }

    /// Restricts the first variable, `loc(first aircraft, 0)`, to `values`.
    ///
    /// Engines restricted to disjoint value sets enumerate disjoint sets of
    /// solutions whose union is the full solution set.
    #[inline]
    pub fn with_first_variable_values(mut self, values: Vec<LocationIndex>) -> Self {
        self.first_variable_values = Some(values);
        self
    }

    /// Why the run ended, once it has.
    #[inline]
    pub fn termination(&self) -> Option<&TerminationReason> {
        self.termination.as_ref()
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    #[inline]
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// Runs the search to its end, collecting the solutions not yet taken.
    pub fn into_outcome(mut self) -> SolveOutcome {
        let solutions: Vec<Solution> = self.by_ref().collect();
        let termination = self
            .termination
            .take()
            .unwrap_or(TerminationReason::Exhausted);
        SolveOutcome::new(solutions, termination, self.statistics)
    }

    fn start(&mut self) -> Option<Solution> {
        self.phase = Phase::Running;
        self.start_time = Instant::now();
        self.monitor.on_enter_search(self.model, &self.statistics);
        debug!(
            "Search started on {} with {} (forward checking: {})",
            self.model,
            self.builder.name(),
            self.forward_checking
        );

        if self.solution_limit == Some(0) {
            self.finish(TerminationReason::Capped);
            return None;
        }

        if self.state.num_variables() == 0 {
            let ids = self.model.fleet().iter().map(|a| a.id()).collect();
            let solution = Solution::empty(ids, self.model.horizon());
            self.emit(&solution);
            if !self.is_finished() {
                self.finish(TerminationReason::Exhausted);
            }
            return Some(solution);
        }

        if !self.initialize_root() {
            self.finish(TerminationReason::Exhausted);
            return None;
        }

        self.resume()
    }

    /// Applies the root restrictions and opens the root level. Returns
    /// `false` if some domain is empty before the first decision.
    fn initialize_root(&mut self) -> bool {
        let model = self.model;
        let first = VariableIndex::new(0);

        if let Some(allowed) = &self.first_variable_values {
            self.scratch.clear();
            self.scratch.extend(
                self.domains
                    .iter(first)
                    .filter(|location| !allowed.contains(location))
                    .map(|location| (first, location)),
            );
        } else {
            self.scratch.clear();
        }

        if self.forward_checking {
            let grid = model.grid();
            for aircraft in AircraftIndex::range(model.num_aircraft()) {
                let variable = self.state.variable(aircraft, 0);
                let initial = self.state.task_state(aircraft, 0);
                self.scratch.extend(
                    self.domains
                        .iter(variable)
                        .filter(|&location| !compatibility_ok(initial, grid.location(location).kind()))
                        .map(|location| (variable, location)),
                );
            }
        }

        let mut removed = 0;
        for &(variable, location) in &self.scratch {
            if self.domains.remove(variable, location) {
                removed += 1;
            }
        }
        self.statistics.on_values_pruned(removed);

        let root_consistent = AircraftIndex::range(model.num_aircraft())
            .all(|aircraft| !self.domains.is_empty(self.state.variable(aircraft, 0)));
        if !root_consistent {
            debug!("Root domains wiped out before the first decision");
            return false;
        }

        self.trail.push_frame();
        self.stack.push_frame();
        self.expand();
        true
    }

    fn resume(&mut self) -> Option<Solution> {
        loop {
            self.statistics.on_step();
            self.monitor.on_step(&self.state, &self.statistics);

            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.state, &self.statistics)
            {
                self.finish(TerminationReason::Aborted(reason));
                return None;
            }

            if self.stack.is_current_level_empty() {
                if self.stack.depth() <= 1 {
                    self.finish(TerminationReason::Exhausted);
                    return None;
                }
                self.backtrack_step();
                continue;
            }

            let Some(decision) = self.stack.pop() else {
                continue;
            };

            if !self.is_admissible(decision) {
                self.statistics.on_pruning_infeasible();
                self.monitor
                    .on_prune(&self.state, PruneReason::Infeasible, &self.statistics);
                continue;
            }

            if let Some(solution) = self.descend(decision) {
                return Some(solution);
            }
        }
    }

    /// Compatibility with the pending work and the slot-local rules of the
    /// decision's slot.
    fn is_admissible(&self, decision: Decision) -> bool {
        let variable = decision.variable();
        let location = decision.location();
        let aircraft = self.state.variable_aircraft(variable);
        let slot = self.state.variable_slot(variable);

        debug_assert_eq!(
            self.state.frontier(aircraft),
            slot,
            "called `Solutions::is_admissible` with a decision beyond the frontier of {}",
            aircraft
        );

        let grid = self.model.grid();
        compatibility_ok(
            self.state.task_state(aircraft, slot),
            grid.location(location).kind(),
        ) && placement_is_consistent(
            grid,
            &self.state.slot_view(slot),
            location,
            self.state.is_jumbo(aircraft),
        )
    }

    /// Commits `decision` on a new level. Returns the schedule if the
    /// assignment became complete.
    fn descend(&mut self, decision: Decision) -> Option<Solution> {
        let variable = decision.variable();
        let location = decision.location();
        let aircraft = self.state.variable_aircraft(variable);
        let slot = self.state.variable_slot(variable);
        let kind = self.model.grid().location(location).kind();
        let next_task_state = self.state.task_state(aircraft, slot).consume(kind);

        self.trail.push_frame();
        self.stack.push_frame();
        self.trail
            .apply_assignment(&mut self.state, variable, location);
        self.trail
            .apply_task_state(&mut self.state, aircraft, slot + 1, next_task_state);

        self.statistics.on_node_explored();
        self.statistics
            .on_depth_update(self.state.num_assigned() as u64);
        self.monitor
            .on_descend(&self.state, decision, &self.statistics);

        if self.forward_checking && !self.propagate(aircraft, slot) {
            self.statistics.on_pruning_wipeout();
            self.monitor
                .on_prune(&self.state, PruneReason::DomainWipeout, &self.statistics);
            self.backtrack_step();
            return None;
        }

        if self.state.is_complete() {
            return self.handle_complete_solution();
        }

        self.expand();
        None
    }

    /// Forward checking after `loc(aircraft, slot)` was assigned: filters the
    /// unassigned variables of the same slot by the slot-local rules and the
    /// aircraft's next variable by compatibility. Returns `false` on a
    /// domain wipe-out.
    fn propagate(&mut self, aircraft: AircraftIndex, slot: usize) -> bool {
        let grid = self.model.grid();
        self.scratch.clear();

        let view = self.state.slot_view(slot);
        for other in AircraftIndex::range(self.state.num_aircraft()) {
            let variable = self.state.variable(other, slot);
            if self.state.is_assigned(variable) {
                continue;
            }
            let is_jumbo = self.state.is_jumbo(other);
            for location in self.domains.iter(variable) {
                if !placement_is_consistent(grid, &view, location, is_jumbo) {
                    self.scratch.push((variable, location));
                }
            }
        }

        if slot + 1 < self.state.horizon() {
            let variable = self.state.variable(aircraft, slot + 1);
            let pending = self.state.task_state(aircraft, slot + 1);
            for location in self.domains.iter(variable) {
                if !compatibility_ok(pending, grid.location(location).kind()) {
                    self.scratch.push((variable, location));
                }
            }
        }

        let mut wiped_out = false;
        for &(variable, location) in &self.scratch {
            if self
                .trail
                .apply_prune(&mut self.domains, variable, location)
                && self.domains.is_empty(variable)
            {
                wiped_out = true;
            }
        }
        self.statistics.on_values_pruned(self.scratch.len());

        !wiped_out
    }

    /// Pushes the builder's decisions for the current node.
    fn expand(&mut self) {
        let before = self.stack.num_entries();
        let decisions = self
            .builder
            .next_decision(self.model, &self.state, &self.domains);
        self.stack.extend(decisions);
        let count = self.stack.num_entries() - before;

        self.statistics.on_decisions_generated(count);
        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.statistics);
    }

    fn backtrack_step(&mut self) {
        self.statistics.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.statistics);

        self.trail.backtrack(&mut self.state, &mut self.domains);
        self.stack.pop_frame();
    }

    fn handle_complete_solution(&mut self) -> Option<Solution> {
        let Some(solution) = self.state.to_solution(self.model) else {
            self.statistics.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.statistics);
            return None;
        };
        self.emit(&solution);
        Some(solution)
    }

    /// Counts a solution and ends the run if it reaches the cap.
    fn emit(&mut self, solution: &Solution) {
        self.emitted += 1;
        self.statistics.on_solution_found();
        self.monitor.on_solution_found(solution, &self.statistics);

        if self.solution_limit.is_some_and(|limit| self.emitted >= limit) {
            self.finish(TerminationReason::Capped);
        }
    }

    fn finish(&mut self, reason: TerminationReason) {
        self.statistics.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.statistics);
        debug!(
            "Search finished ({}) with {} solution(s) after {} nodes",
            reason, self.emitted, self.statistics.nodes_explored
        );
        self.termination = Some(reason);
        self.phase = Phase::Finished;
    }
}

impl<B, M> Iterator for Solutions<'_, B, M>
where
    B: DecisionBuilder,
    M: TreeSearchMonitor,
{
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Finished => None,
            Phase::Ready => self.start(),
            Phase::Running => self.resume(),
        }
    }
}

impl<B, M> FusedIterator for Solutions<'_, B, M>
where
    B: DecisionBuilder,
    M: TreeSearchMonitor,
{
}

impl<B, M> std::fmt::Debug for Solutions<'_, B, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solutions")
            .field("state", &self.state)
            .field("emitted", &self.emitted)
            .field("termination", &self.termination)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl<B, M> std::fmt::Display for Solutions<'_, B, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.termination {
            Some(reason) => write!(f, "Solutions(emitted: {}, termination: {})", self.emitted, reason),
            None => write!(f, "Solutions(emitted: {}, running)", self.emitted),
        }
    }
}

/// Runs the engine under a `SolverConfig`.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: SolverConfig,
}

impl BacktrackingSolver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// A configured engine with an explicit builder and monitor. The time
    /// limit of the configuration is not applied here.
    pub fn solutions<'a, B, M>(&self, model: &'a Model, builder: B, monitor: M) -> Solutions<'a, B, M>
    where
        B: DecisionBuilder,
        M: TreeSearchMonitor,
    {
        Solutions::new(model, builder, monitor)
            .with_solution_limit(self.config.solution_limit)
            .with_forward_checking(self.config.forward_checking)
    }

    /// Collects the solutions of `model` according to the configuration.
    pub fn solve<'a, M>(&self, model: &'a Model, monitor: M) -> SolveOutcome
    where
        M: TreeSearchMonitor + 'a,
    {
        self.run(model, monitor, None)
    }

    /// Like `solve`, with the first variable restricted to `first_values`.
    pub fn solve_partition<'a, M>(
        &self,
        model: &'a Model,
        monitor: M,
        first_values: &[LocationIndex],
    ) -> SolveOutcome
    where
        M: TreeSearchMonitor + 'a,
    {
        self.run(model, monitor, Some(first_values.to_vec()))
    }

    fn run<'a, M>(
        &self,
        model: &'a Model,
        monitor: M,
        first_values: Option<Vec<LocationIndex>>,
    ) -> SolveOutcome
    where
        M: TreeSearchMonitor + 'a,
    {
        match self.config.time_limit {
            Some(limit) => {
                let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
                composite.add_monitor(TimeLimitMonitor::with_default_mask(limit));
                composite.add_monitor(monitor);
                self.dispatch(model, composite, first_values)
            }
            None => self.dispatch(model, monitor, first_values),
        }
    }

    fn dispatch<M>(
        &self,
        model: &Model,
        monitor: M,
        first_values: Option<Vec<LocationIndex>>,
    ) -> SolveOutcome
    where
        M: TreeSearchMonitor,
    {
        let num_locations = model.num_locations();
        match self.config.heuristic {
            Heuristic::Chronological => {
                let builder = ChronologicalBuilder::preallocated(num_locations);
                Self::restrict(self.solutions(model, builder, monitor), first_values).into_outcome()
            }
            Heuristic::MostConstrained => {
                let builder = MostConstrainedBuilder::preallocated(num_locations);
                Self::restrict(self.solutions(model, builder, monitor), first_values).into_outcome()
            }
        }
    }

    fn restrict<'a, B, M>(
        solutions: Solutions<'a, B, M>,
        first_values: Option<Vec<LocationIndex>>,
    ) -> Solutions<'a, B, M>
    where
        B: DecisionBuilder,
        M: TreeSearchMonitor,
    {
        match first_values {
            Some(values) => solutions.with_first_variable_values(values),
            None => solutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::interrupt::InterruptMonitor;
    use hangar_core::math::coordinate::Coordinate;
    use hangar_model::{
        fleet::AircraftSpec,
        grid::LocationKind,
        model::{build_model, ModelBuilder},
    };
    use std::sync::atomic::AtomicBool;

    fn parking_row(cols: usize, horizon: usize, aircraft: &[AircraftSpec]) -> Model {
        let mut b = ModelBuilder::new(1, cols);
        b.set_horizon(horizon).fill_parking();
        for spec in aircraft {
            b.add_aircraft(*spec);
        }
        b.build().unwrap()
    }

    fn coordinates(solution: &Solution, slot: usize) -> Vec<(usize, usize)> {
        solution
            .slot(slot)
            .iter()
            .map(|l| (l.row(), l.col()))
            .collect()
    }

    #[test]
    fn test_single_parked_aircraft() {
        let m = build_model(1, 1, &[], &[], &[(0, 0)], &[AircraftSpec::standard(1, 0, 0)], 1)
            .unwrap();
        let solutions: Vec<Solution> = solve(&m, 10).collect();
        assert_eq!(solutions.len(), 1);
        let l = solutions[0].location_of(1, 0).unwrap();
        assert_eq!(l.coordinate(), Coordinate::new(0, 0));
        assert_eq!(l.kind(), LocationKind::Parking);
    }

    #[test]
    fn test_specialist_work_is_done_first() {
        // SPC at (0,0), PRK at (0,1); one aircraft with one task of each type.
        let m = build_model(
            1,
            2,
            &[],
            &[(0, 0)],
            &[(0, 1)],
            &[AircraftSpec::standard(5, 1, 1)],
            3,
        )
        .unwrap();
        let solutions: Vec<Solution> = solve(&m, 10).collect();
        assert_eq!(solutions.len(), 1);
        let kinds: Vec<LocationKind> = solutions[0]
            .itinerary(AircraftIndex::new(0))
            .map(|l| l.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                LocationKind::SpecialistBay,
                LocationKind::SpecialistBay,
                LocationKind::Parking
            ]
        );
    }

    #[test]
    fn test_clearance_forces_sharing_on_two_cells() {
        // Two cells, two aircraft: side by side boxes both in, so they must share.
        let m = parking_row(
            2,
            1,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let solutions: Vec<Solution> = solve(&m, 10).collect();
        assert_eq!(solutions.len(), 2);
        assert_eq!(coordinates(&solutions[0], 0), vec![(0, 0), (0, 0)]);
        assert_eq!(coordinates(&solutions[1], 0), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_cap_is_reached_at_emission() {
        let m = parking_row(
            2,
            2,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );

        let mut all = solve(&m, usize::MAX);
        assert_eq!(all.by_ref().count(), 4);
        assert_eq!(all.termination(), Some(&TerminationReason::Exhausted));

        let mut capped = solve(&m, 3);
        assert_eq!(capped.by_ref().count(), 3);
        assert_eq!(capped.termination(), Some(&TerminationReason::Capped));
        assert_eq!(capped.next(), None);

        let exact = solve(&m, 4).into_outcome();
        assert_eq!(exact.len(), 4);
        assert_eq!(exact.termination(), &TerminationReason::Capped);
    }

    #[test]
    fn test_zero_cap_yields_nothing() {
        let m = parking_row(1, 1, &[AircraftSpec::standard(1, 0, 0)]);
        let outcome = solve(&m, 0).into_outcome();
        assert!(outcome.is_empty());
        assert_eq!(outcome.termination(), &TerminationReason::Capped);
        assert_eq!(outcome.statistics().nodes_explored, 0);
    }

    #[test]
    fn test_trivial_solution_without_variables() {
        let empty_fleet = parking_row(2, 3, &[]);
        let solutions: Vec<Solution> = solve(&empty_fleet, 5).collect();
        assert_eq!(solutions.len(), 1);
        assert!(solutions[0].is_empty());
        assert_eq!(solutions[0].horizon(), 3);

        let zero_horizon = parking_row(2, 0, &[AircraftSpec::jumbo(1, 2, 2)]);
        let outcome = solve(&zero_horizon, 5).into_outcome();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.solutions()[0].aircraft_ids(), &[1]);
        assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
    }

    #[test]
    fn test_two_jumbos_on_one_specialist_bay_are_infeasible() {
        let m = build_model(
            1,
            1,
            &[],
            &[(0, 0)],
            &[],
            &[AircraftSpec::jumbo(1, 0, 1), AircraftSpec::jumbo(2, 0, 1)],
            1,
        )
        .unwrap();

        for forward_checking in [true, false] {
            let outcome = BacktrackingSolver::new(
                SolverConfig::new()
                    .with_solution_limit(None)
                    .with_forward_checking(forward_checking),
            )
            .solve(&m, NoOperationMonitor::new());
            assert!(outcome.is_infeasible());
        }
    }

    #[test]
    fn test_no_locations_is_infeasible() {
        let m = build_model(2, 2, &[], &[], &[], &[AircraftSpec::standard(1, 0, 0)], 2).unwrap();
        for forward_checking in [true, false] {
            let outcome = solve(&m, 1)
                .with_forward_checking(forward_checking)
                .into_outcome();
            assert!(outcome.is_infeasible());
        }
    }

    #[test]
    fn test_forward_checking_does_not_change_the_sequence() {
        let m = parking_row(
            3,
            2,
            &[
                AircraftSpec::standard(1, 0, 0),
                AircraftSpec::jumbo(2, 0, 0),
                AircraftSpec::standard(3, 0, 0),
            ],
        );
        let with: Vec<Solution> = solve(&m, usize::MAX).collect();
        let without: Vec<Solution> = solve(&m, usize::MAX)
            .with_forward_checking(false)
            .collect();
        assert!(!with.is_empty());
        assert_eq!(with, without);
    }

    #[test]
    fn test_most_constrained_finds_the_same_set() {
        let m = build_model(
            2,
            2,
            &[(0, 0)],
            &[(1, 1)],
            &[(0, 1), (1, 0)],
            &[
                AircraftSpec::standard(1, 1, 0),
                AircraftSpec::standard(2, 0, 1),
                AircraftSpec::jumbo(3, 0, 0),
            ],
            2,
        )
        .unwrap();
        let config = SolverConfig::new().with_solution_limit(None);

        let mut chronological = BacktrackingSolver::new(config.clone())
            .solve(&m, NoOperationMonitor::new())
            .into_solutions();
        let mut most_constrained = BacktrackingSolver::new(
            config.with_heuristic(Heuristic::MostConstrained),
        )
        .solve(&m, NoOperationMonitor::new())
        .into_solutions();

        assert!(!chronological.is_empty());
        chronological.sort_by_key(|s| format!("{:?}", s));
        most_constrained.sort_by_key(|s| format!("{:?}", s));
        assert_eq!(chronological, most_constrained);
    }

    #[test]
    fn test_partition_covers_the_solution_set() {
        let m = parking_row(
            3,
            1,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let solver = BacktrackingSolver::new(SolverConfig::new().with_solution_limit(None));
        let all = solver.solve(&m, NoOperationMonitor::new()).into_solutions();

        let mut merged = Vec::new();
        for chunk in [[0usize].as_slice(), &[1, 2]] {
            let values: Vec<LocationIndex> = chunk.iter().map(|&i| LocationIndex::new(i)).collect();
            merged.extend(
                solver
                    .solve_partition(&m, NoOperationMonitor::new(), &values)
                    .into_solutions(),
            );
        }
        assert_eq!(merged, all);
    }

    #[test]
    fn test_interrupt_aborts_before_any_solution() {
        let m = parking_row(2, 2, &[AircraftSpec::standard(1, 0, 0)]);
        let flag = AtomicBool::new(true);
        let outcome = Solutions::new(&m, ChronologicalBuilder::new(), InterruptMonitor::new(&flag))
            .into_outcome();
        assert!(outcome.is_empty());
        assert!(outcome.termination().is_aborted());
        assert!(!outcome.is_infeasible());
    }

    #[test]
    fn test_state_is_restored_after_exhaustion() {
        let m = parking_row(
            2,
            2,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let mut engine = solve(&m, usize::MAX);
        assert_eq!(engine.by_ref().count(), 4);
        assert!(engine.is_finished());
        assert_eq!(engine.state.num_assigned(), 0);
        assert_eq!(engine.trail.depth(), 1);
        assert_eq!(engine.stack.depth(), 1);
        assert_eq!(engine.trail.num_entries(), 0);
    }

    #[test]
    fn test_statistics_are_coherent() {
        let m = parking_row(
            2,
            2,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let outcome = solve(&m, usize::MAX).into_outcome();
        let stats = outcome.statistics();
        assert_eq!(stats.solutions_found, 4);
        assert_eq!(stats.max_depth, m.num_variables() as u64);
        assert!(stats.nodes_explored >= 4 * m.num_variables() as u64 / 2);
        assert!(stats.decisions_generated >= stats.nodes_explored);
        assert!(stats.steps > 0);
    }

    #[test]
    fn test_display() {
        let m = parking_row(1, 1, &[AircraftSpec::standard(1, 0, 0)]);
        let mut engine = solve(&m, 1);
        assert_eq!(engine.to_string(), "Solutions(emitted: 0, running)");
        engine.next();
        assert_eq!(engine.to_string(), "Solutions(emitted: 1, termination: Capped)");
    }
}
