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

//! Undo log for the search state.
//!
//! Every mutation the engine makes below the root is recorded as a
//! `TrailEntry` before (or while) it is applied: variable assignments,
//! derived task states and domain prunings. Frames mark decision levels; a
//! backtrack pops the newest frame and undoes its entries newest-first, which
//! restores `SearchState` and `Domains` exactly as they were when the frame
//! was pushed.

use crate::{domain::Domains, state::SearchState};
use hangar_model::{
    index::{AircraftIndex, LocationIndex, VariableIndex},
    task::TaskState,
};

/// A single reversible mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TrailEntry {
    /// A variable received a location.
    Assign { variable: VariableIndex },
    /// A task state arena entry was overwritten; `previous` is the old value.
    TaskState {
        aircraft: AircraftIndex,
        slot: usize,
        previous: TaskState,
    },
    /// A value was removed from a domain.
    Prune {
        variable: VariableIndex,
        location: LocationIndex,
    },
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailEntry::Assign { variable } => write!(f, "Assign({})", variable),
            TrailEntry::TaskState {
                aircraft,
                slot,
                previous,
            } => write!(f, "TaskState({}, slot: {}, previous: {})", aircraft, slot, previous),
            TrailEntry::Prune { variable, location } => {
                write!(f, "Prune({}, {})", variable, location)
            }
        }
    }
}

/// A linear undo log with frame markers.
///
/// Usage per decision level:
/// 1. `push_frame()` before the first mutation of the level,
/// 2. `apply_*` for every mutation,
/// 3. `backtrack(..)` to revert everything since the matching `push_frame()`.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<TrailEntry>,
    /// `frames[i]` is the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail with room for `num_variables` decision levels.
    #[inline]
    pub fn preallocated(num_variables: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_variables.saturating_mul(2)),
            frames: Vec::with_capacity(num_variables + 1),
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Opens a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Assigns `variable := location` and records it.
    #[inline]
    pub fn apply_assignment(
        &mut self,
        state: &mut SearchState,
        variable: VariableIndex,
        location: LocationIndex,
    ) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_assignment` without an open frame"
        );
        state.assign(variable, location);
        self.entries.push(TrailEntry::Assign { variable });
    }

    /// Stores `value` as the task state of `aircraft` at `slot` and records
    /// the value it replaces.
    #[inline]
    pub fn apply_task_state(
        &mut self,
        state: &mut SearchState,
        aircraft: AircraftIndex,
        slot: usize,
        value: TaskState,
    ) {
        let previous = state.replace_task_state(aircraft, slot, value);
        self.entries.push(TrailEntry::TaskState {
            aircraft,
            slot,
            previous,
        });
    }

    /// Removes `location` from the domain of `variable`. Only an actual
    /// removal is recorded; returns whether one happened.
    #[inline]
    pub fn apply_prune(
        &mut self,
        domains: &mut Domains,
        variable: VariableIndex,
        location: LocationIndex,
    ) -> bool {
        let removed = domains.remove(variable, location);
        if removed {
            self.entries.push(TrailEntry::Prune { variable, location });
        }
        removed
    }

    /// Pops the newest frame and reverts its mutations. Returns `false` if
    /// no frame was open.
    pub fn backtrack(&mut self, state: &mut SearchState, domains: &mut Domains) -> bool {
        let Some(start) = self.frames.pop() else {
            return false;
        };

        while self.entries.len() > start {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            match entry {
                TrailEntry::Assign { variable } => state.unassign(variable),
                TrailEntry::TaskState {
                    aircraft,
                    slot,
                    previous,
                } => {
                    state.replace_task_state(aircraft, slot, previous);
                }
                TrailEntry::Prune { variable, location } => domains.restore(variable, location),
            }
        }

        true
    }

    /// Clears entries and frames, keeping the allocations.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_model::{fleet::AircraftSpec, model::{Model, ModelBuilder}};

    fn model() -> Model {
        let mut b = ModelBuilder::new(1, 2);
        b.set_horizon(2)
            .add_specialist_bay(0, 0)
            .add_parking(0, 1)
            .add_aircraft(AircraftSpec::standard(1, 0, 1));
        b.build().unwrap()
    }

    #[test]
    fn test_backtrack_without_frame_is_noop() {
        let m = model();
        let mut s = SearchState::new(&m);
        let mut d = Domains::new(m.num_variables(), m.num_locations());
        let mut t = SearchTrail::new();
        assert!(!t.backtrack(&mut s, &mut d));
        assert!(t.is_empty());
    }

    #[test]
    fn test_backtrack_restores_state_and_domains() {
        let m = model();
        let mut s = SearchState::new(&m);
        let mut d = Domains::new(m.num_variables(), m.num_locations());
        let (s0, d0) = (s.clone(), d.clone());

        let a = AircraftIndex::new(0);
        let v0 = VariableIndex::new(0);
        let v1 = VariableIndex::new(1);

        let mut t = SearchTrail::preallocated(m.num_variables());
        t.push_frame();
        t.apply_assignment(&mut s, v0, LocationIndex::new(0));
        t.apply_task_state(&mut s, a, 1, TaskState::new(0, 0));
        assert!(t.apply_prune(&mut d, v1, LocationIndex::new(0)));
        assert!(!t.apply_prune(&mut d, v1, LocationIndex::new(0)));
        assert_eq!(t.num_entries(), 3);
        assert_eq!(t.depth(), 1);

        assert_eq!(s.task_state(a, 1), TaskState::new(0, 0));
        assert!(!d.contains(v1, LocationIndex::new(0)));

        assert!(t.backtrack(&mut s, &mut d));
        assert_eq!(s, s0);
        assert_eq!(d, d0);
        assert_eq!(t.num_entries(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_nested_frames_unwind_one_level_at_a_time() {
        let m = model();
        let mut s = SearchState::new(&m);
        let mut d = Domains::new(m.num_variables(), m.num_locations());

        let mut t = SearchTrail::new();
        t.push_frame();
        t.apply_assignment(&mut s, VariableIndex::new(0), LocationIndex::new(0));
        let after_first = s.clone();

        t.push_frame();
        t.apply_assignment(&mut s, VariableIndex::new(1), LocationIndex::new(1));
        assert!(s.is_complete());

        t.backtrack(&mut s, &mut d);
        assert_eq!(s, after_first);
        assert_eq!(t.depth(), 1);

        t.backtrack(&mut s, &mut d);
        assert_eq!(s.num_assigned(), 0);
    }

    #[test]
    fn test_reset_and_display() {
        let m = model();
        let mut s = SearchState::new(&m);
        let mut t = SearchTrail::new();
        t.push_frame();
        t.apply_assignment(&mut s, VariableIndex::new(0), LocationIndex::new(1));
        assert_eq!(t.to_string(), "SearchTrail(entries: 1, frames: 1)");
        assert_eq!(
            t.entries()[0].to_string(),
            "Assign(VariableIndex(0))"
        );
        t.reset();
        assert_eq!(t.to_string(), "SearchTrail(entries: 0, frames: 0)");
        assert!(t.is_empty());
    }
}
