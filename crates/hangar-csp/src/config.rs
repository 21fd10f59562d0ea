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

//! Solver configuration.

use std::time::Duration;

/// Variable-ordering heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// `(slot, aircraft)` order; solutions come out in canonical order.
    #[default]
    Chronological,
    /// Fewest remaining values first.
    MostConstrained,
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Chronological => write!(f, "chronological"),
            Heuristic::MostConstrained => write!(f, "most-constrained"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop after this many solutions; `None` enumerates all of them.
    pub solution_limit: Option<usize>,
    pub heuristic: Heuristic,
    pub forward_checking: bool,
    pub time_limit: Option<Duration>,
    /// Worker threads of the parallel solver.
    pub threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            solution_limit: Some(1),
            heuristic: Heuristic::Chronological,
            forward_checking: true,
            time_limit: None,
            threads: 1,
        }
    }
}

impl SolverConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: Option<usize>) -> Self {
        self.solution_limit = limit;
        self
    }

    #[inline]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[inline]
    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let limit = match self.solution_limit {
            Some(n) => n.to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "SolverConfig(solution_limit: {}, heuristic: {}, forward_checking: {}, threads: {})",
            limit, self.heuristic, self.forward_checking, self.threads
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.solution_limit, Some(1));
        assert_eq!(c.heuristic, Heuristic::Chronological);
        assert!(c.forward_checking);
        assert_eq!(c.time_limit, None);
        assert_eq!(c.threads, 1);
    }

    #[test]
    fn test_builder_chain() {
        let c = SolverConfig::new()
            .with_solution_limit(None)
            .with_heuristic(Heuristic::MostConstrained)
            .with_forward_checking(false)
            .with_time_limit(Some(Duration::from_secs(2)))
            .with_threads(0);
        assert_eq!(c.threads, 1);
        assert_eq!(
            c.to_string(),
            "SolverConfig(solution_limit: none, heuristic: most-constrained, forward_checking: false, threads: 1)"
        );
    }
}
