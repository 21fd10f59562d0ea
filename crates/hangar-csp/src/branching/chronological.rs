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
    branching::decision::{fill_from_domain, BufferedDecisions, Decision, DecisionBuilder},
    domain::Domains,
    state::SearchState,
};
use hangar_model::{
    index::{AircraftIndex, VariableIndex},
    model::Model,
};

/// Branches on variables in `(slot, aircraft)` order, the canonical order
/// of the schedule, and tries locations in `(row, col)` order.
///
/// Because every slot is completed before the next one starts, the selected
/// variable is always the unassigned one with the smallest index.
#[derive(Debug, Clone, Default)]
pub struct ChronologicalBuilder {
    buffer: Vec<Decision>,
}

impl ChronologicalBuilder {
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

    /// The frontier variable with the smallest `(slot, aircraft)` key.
    fn select(state: &SearchState) -> Option<VariableIndex> {
        AircraftIndex::range(state.num_aircraft())
            .filter_map(|aircraft| state.frontier_variable(aircraft))
            .min()
    }
}

impl DecisionBuilder for ChronologicalBuilder {
    type DecisionIterator<'a>
        = BufferedDecisions<'a>
    where
        Self: 'a;

    fn name(&self) -> &str {
        "ChronologicalBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        _model: &'a Model,
        state: &'a SearchState,
        domains: &'a Domains,
    ) -> Self::DecisionIterator<'a> {
        match Self::select(state) {
            Some(variable) => fill_from_domain(&mut self.buffer, domains, variable),
            None => self.buffer.clear(),
        }
        self.buffer.iter().copied().rev()
    }
}
