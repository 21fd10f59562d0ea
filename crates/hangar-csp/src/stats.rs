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

use std::time::Duration;

/// Counters collected while the engine walks the search tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Decisions committed (nodes entered below the root).
    pub nodes_explored: u64,
    /// Decision levels abandoned.
    pub backtracks: u64,
    /// Candidate decisions pushed onto the stack.
    pub decisions_generated: u64,
    /// Iterations of the main loop.
    pub steps: u64,
    /// Candidates rejected because a rule failed on assignment.
    pub prunings_infeasible: u64,
    /// Nodes abandoned because forward checking emptied a domain.
    pub prunings_wipeout: u64,
    /// Domain values removed by forward checking.
    pub values_pruned: u64,
    pub solutions_found: u64,
    pub max_depth: u64,
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_decisions_generated(&mut self, count: usize) {
        self.decisions_generated = self.decisions_generated.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_wipeout(&mut self) {
        self.prunings_wipeout = self.prunings_wipeout.saturating_add(1);
    }

    #[inline]
    pub fn on_values_pruned(&mut self, count: usize) {
        self.values_pruned = self.values_pruned.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Adds the counters of `other` (a worker's run) into `self`. Depth takes
    /// the maximum and time the longest run.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.decisions_generated = self
            .decisions_generated
            .saturating_add(other.decisions_generated);
        self.steps = self.steps.saturating_add(other.steps);
        self.prunings_infeasible = self
            .prunings_infeasible
            .saturating_add(other.prunings_infeasible);
        self.prunings_wipeout = self.prunings_wipeout.saturating_add(other.prunings_wipeout);
        self.values_pruned = self.values_pruned.saturating_add(other.values_pruned);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_total = self.time_total.max(other.time_total);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Hangar Search Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (wipe-out):   {}", self.prunings_wipeout)?;
        writeln!(f, "  Values pruned:         {}", self.values_pruned)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = SearchStatistics::default();
        s.on_node_explored();
        s.on_node_explored();
        s.on_backtrack();
        s.on_decisions_generated(5);
        s.on_pruning_infeasible();
        s.on_pruning_wipeout();
        s.on_values_pruned(3);
        s.on_solution_found();
        s.on_depth_update(4);
        s.on_depth_update(2);
        s.on_step();

        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.backtracks, 1);
        assert_eq!(s.decisions_generated, 5);
        assert_eq!(s.prunings_infeasible, 1);
        assert_eq!(s.prunings_wipeout, 1);
        assert_eq!(s.values_pruned, 3);
        assert_eq!(s.solutions_found, 1);
        assert_eq!(s.max_depth, 4);
        assert_eq!(s.steps, 1);
    }

    #[test]
    fn test_saturation() {
        let mut s = SearchStatistics {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        s.on_node_explored();
        assert_eq!(s.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_merge() {
        let mut a = SearchStatistics {
            nodes_explored: 3,
            max_depth: 2,
            time_total: Duration::from_millis(5),
            ..Default::default()
        };
        let b = SearchStatistics {
            nodes_explored: 4,
            solutions_found: 1,
            max_depth: 6,
            time_total: Duration::from_millis(2),
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.nodes_explored, 7);
        assert_eq!(a.solutions_found, 1);
        assert_eq!(a.max_depth, 6);
        assert_eq!(a.time_total, Duration::from_millis(5));
    }

    #[test]
    fn test_display_lists_counters() {
        let s = SearchStatistics::default();
        let text = s.to_string();
        assert!(text.starts_with("Hangar Search Statistics:"));
        assert!(text.contains("Nodes explored:        0"));
        assert!(text.contains("Solutions found:       0"));
    }
}
