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

use crate::{domain::Domains, state::SearchState};
use hangar_model::{
    index::{LocationIndex, VariableIndex},
    model::Model,
};
use std::iter::FusedIterator;

/// A tentative assignment `variable := location`.
///
/// Decisions are cheap candidates: the builder enumerates them from the
/// variable's current domain and the engine checks every rule before
/// committing one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    variable: VariableIndex,
    location: LocationIndex,
}

impl Decision {
    #[inline]
    pub const fn new(variable: VariableIndex, location: LocationIndex) -> Self {
        Self { variable, location }
    }

    #[inline]
    pub const fn variable(&self) -> VariableIndex {
        self.variable
    }

    #[inline]
    pub const fn location(&self) -> LocationIndex {
        self.location
    }
}

impl Ord for Decision {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.variable
            .cmp(&other.variable)
            .then(self.location.cmp(&other.location))
    }
}

impl PartialOrd for Decision {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decision(variable: {}, location: {})",
            self.variable, self.location
        )
    }
}

/// Chooses the next variable to branch on and enumerates its values.
///
/// The engine pushes the yielded decisions onto a LIFO stack, so builders
/// yield them in *descending* preference: the last item is tried first.
/// Yielding nothing while unassigned variables remain makes the engine
/// backtrack.
///
/// Every builder must only pick an aircraft's frontier variable, so that the
/// task state the value is checked against is already known.
pub trait DecisionBuilder {
    type DecisionIterator<'a>: Iterator<Item = Decision> + FusedIterator + 'a
    where
        Self: 'a;

    fn name(&self) -> &str;

    fn next_decision<'a>(
        &'a mut self,
        model: &'a Model,
        state: &'a SearchState,
        domains: &'a Domains,
    ) -> Self::DecisionIterator<'a>;
}

/// Iterator type shared by the builders: a buffer filled in ascending
/// location order, handed out back to front.
pub type BufferedDecisions<'a> =
    std::iter::Rev<std::iter::Copied<std::slice::Iter<'a, Decision>>>;

/// Clears `buffer` and fills it with every remaining value of `variable`
/// in ascending location order.
#[inline]
pub(crate) fn fill_from_domain(buffer: &mut Vec<Decision>, domains: &Domains, variable: VariableIndex) {
    buffer.clear();
    buffer.extend(
        domains
            .iter(variable)
            .map(|location| Decision::new(variable, location)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_variable_then_location() {
        let a = Decision::new(VariableIndex::new(0), LocationIndex::new(3));
        let b = Decision::new(VariableIndex::new(1), LocationIndex::new(0));
        let c = Decision::new(VariableIndex::new(1), LocationIndex::new(2));
        let mut v = vec![c, b, a];
        v.sort();
        assert_eq!(v, vec![a, b, c]);
    }

    #[test]
    fn test_display() {
        let d = Decision::new(VariableIndex::new(4), LocationIndex::new(1));
        assert_eq!(
            d.to_string(),
            "Decision(variable: VariableIndex(4), location: LocationIndex(1))"
        );
    }

    #[test]
    fn test_fill_from_domain_skips_pruned_values() {
        let mut domains = Domains::new(2, 3);
        domains.remove(VariableIndex::new(1), LocationIndex::new(1));
        let mut buffer = vec![Decision::new(VariableIndex::new(0), LocationIndex::new(0))];
        fill_from_domain(&mut buffer, &domains, VariableIndex::new(1));
        let locations: Vec<usize> = buffer.iter().map(|d| d.location().get()).collect();
        assert_eq!(locations, vec![0, 2]);
    }
}
