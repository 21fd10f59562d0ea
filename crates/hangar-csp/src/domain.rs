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

//! Variable domains.
//!
//! One bit set of candidate locations per `loc(a, t)` variable. Every usable
//! location starts in every domain; the engine removes values through the
//! trail (forward checking) and restores them on backtrack. Iteration is in
//! ascending `LocationIndex`, i.e. `(row, col)` order.

use fixedbitset::FixedBitSet;
use hangar_model::index::{LocationIndex, VariableIndex};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Domains {
    values: Vec<FixedBitSet>,
    sizes: Vec<usize>,
}

impl Domains {
    /// Full domains for `num_variables` variables over `num_locations` values.
    pub fn new(num_variables: usize, num_locations: usize) -> Self {
        let mut full = FixedBitSet::with_capacity(num_locations);
        full.insert_range(..);

        Self {
            values: vec![full; num_variables],
            sizes: vec![num_locations; num_variables],
        }
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn contains(&self, variable: VariableIndex, location: LocationIndex) -> bool {
        debug_assert!(
            variable.get() < self.num_variables(),
            "called `Domains::contains` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            variable.get()
        );
        self.values[variable.get()].contains(location.get())
    }

    /// Number of values left for `variable`.
    #[inline]
    pub fn size(&self, variable: VariableIndex) -> usize {
        self.sizes[variable.get()]
    }

    #[inline]
    pub fn is_empty(&self, variable: VariableIndex) -> bool {
        self.size(variable) == 0
    }

    /// Removes `location` from the domain. Returns `false` if it was not there.
    #[inline]
    pub fn remove(&mut self, variable: VariableIndex, location: LocationIndex) -> bool {
        let set = &mut self.values[variable.get()];
        if !set.contains(location.get()) {
            return false;
        }
        set.set(location.get(), false);
        self.sizes[variable.get()] -= 1;
        true
    }

    /// Puts a previously removed `location` back.
    #[inline]
    pub fn restore(&mut self, variable: VariableIndex, location: LocationIndex) {
        let set = &mut self.values[variable.get()];
        debug_assert!(
            !set.contains(location.get()),
            "called `Domains::restore` with a value that is still present: {} in {}",
            location,
            variable
        );
        set.insert(location.get());
        self.sizes[variable.get()] += 1;
    }

    /// Remaining values of `variable` in ascending order.
    #[inline]
    pub fn iter(&self, variable: VariableIndex) -> impl Iterator<Item = LocationIndex> + '_ {
        self.values[variable.get()].ones().map(LocationIndex::new)
    }
}

impl std::fmt::Display for Domains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: usize = self.sizes.iter().sum();
        write!(
            f,
            "Domains(variables: {}, values: {})",
            self.num_variables(),
            total
        )
    }
}
