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

use crate::stats::SearchStatistics;
use hangar_model::solution::Solution;

/// Why a search run ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The whole search space was explored. Zero solutions means the
    /// instance is infeasible.
    Exhausted,
    /// The solution cap was reached.
    Capped,
    /// A monitor stopped the search (time limit, interrupt).
    Aborted(String),
}

impl TerminationReason {
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Exhausted"),
            TerminationReason::Capped => write!(f, "Capped"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Solutions of a finished run, in discovery order, with the reason the run
/// ended and its statistics.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    solutions: Vec<Solution>,
    termination: TerminationReason,
    statistics: SearchStatistics,
}

impl SolveOutcome {
    #[inline]
    pub fn new(
        solutions: Vec<Solution>,
        termination: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            solutions,
            termination,
            statistics,
        }
    }

    #[inline]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    #[inline]
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    #[inline]
    pub fn termination(&self) -> &TerminationReason {
        &self.termination
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Returns `true` if the search proved that no schedule exists.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.solutions.is_empty() && self.termination == TerminationReason::Exhausted
    }
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveOutcome(solutions: {}, termination: {})",
            self.solutions.len(),
            self.termination
        )
    }
}
