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

//! Most constrained variable (MRV) branching
//!
//! Among the frontier variables (one per aircraft with slots left), picks the
//! one with the fewest remaining domain values, ties broken by
//! `(slot, aircraft)`. With forward checking enabled, a variable whose domain
//! shrank to a single value is committed before anything else, and an empty
//! domain surfaces immediately.
//!
//! Only frontier variables are candidates, so the task state every value is
//! checked against is always known. The heuristic changes the order in which
//! solutions are found, never the set of solutions.

use crate::{
    branching::decision::{fill_from_domain, BufferedDecisions, Decision, DecisionBuilder},
    domain::Domains,
    state::SearchState,
};
use hangar_model::{
    index::{AircraftIndex, VariableIndex},
    model::Model,
};

#[derive(Debug, Clone, Default)]
pub struct MostConstrainedBuilder {
    buffer: Vec<Decision>,
}

impl MostConstrainedBuilder {
    #[inline]
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    #[inline]
    pub fn preallocated(num_locations: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(num_locations),
        }
    }

    fn select(state: &SearchState, domains: &Domains) -> Option<VariableIndex> {
        AircraftIndex::range(state.num_aircraft())
            .filter_map(|aircraft| state.frontier_variable(aircraft))
            .min_by_key(|&variable| {
                (
                    domains.size(variable),
                    state.variable_slot(variable),
                    state.variable_aircraft(variable),
                )
            })
    }
}

impl DecisionBuilder for MostConstrainedBuilder {
    type DecisionIterator<'a>
        = BufferedDecisions<'a>
    where
        Self: 'a;

    fn name(&self) -> &str {
        "MostConstrainedBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        _model: &'a Model,
        state: &'a SearchState,
        domains: &'a Domains,
    ) -> Self::DecisionIterator<'a> {
        match Self::select(state, domains) {
            Some(variable) => fill_from_domain(&mut self.buffer, domains, variable),
            None => self.buffer.clear(),
        }
        self.buffer.iter().copied().rev()
    }
}
