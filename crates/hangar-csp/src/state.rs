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

//! Mutable search state.
//!
//! `SearchState` is the single partial assignment the engine works on. It
//! stores, for every `loc(a, t)` variable, the chosen location (if any), and
//! keeps two derived views consistent with it:
//!
//! - per-slot occupancy (occupant and jumbo counts per location), read by the
//!   constraint predicates through `SlotView`;
//! - the `TaskState` arena, `(horizon + 1) x num_aircraft` entries stored
//!   slot-major, where entry `(t, a)` is the work pending for `a` when slot
//!   `t` begins.
//!
//! Every aircraft is assigned slot by slot from slot 0 onwards. The number of
//! assigned slots of aircraft `a` is its *frontier*; the variable
//! `loc(a, frontier(a))` is the only one of that aircraft the search may
//! assign next, and `TaskState(a, t)` is known for every `t <= frontier(a)`.
//!
//! The state itself never decides anything. Mutations come from the trail,
//! which records them so that backtracking can undo them exactly.

use crate::constraints::SlotView;
use fixedbitset::FixedBitSet;
use hangar_model::{
    index::{AircraftIndex, LocationIndex, VariableIndex},
    model::Model,
    solution::Solution,
    task::TaskState,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    num_aircraft: usize,
    num_locations: usize,
    horizon: usize,
    assignments: Vec<Option<LocationIndex>>,
    assigned: FixedBitSet,
    num_assigned: usize,
    frontier: Vec<usize>,
    is_jumbo: Vec<bool>,
    task_states: Vec<TaskState>,
    occupants: Vec<u8>,
    jumbos: Vec<u8>,
}

impl SearchState {
    /// Creates the empty assignment for `model`, with the initial task
    /// states of slot 0 in place.
    pub fn new(model: &Model) -> Self {
        let num_aircraft = model.num_aircraft();
        let num_locations = model.num_locations();
        let horizon = model.horizon();
        let num_variables = model.num_variables();

        let mut task_states = vec![TaskState::default(); (horizon + 1) * num_aircraft];
        let mut is_jumbo = Vec::with_capacity(num_aircraft);
        for aircraft in AircraftIndex::range(num_aircraft) {
            task_states[aircraft.get()] = model.initial_task_state(aircraft);
            is_jumbo.push(model.aircraft(aircraft).is_jumbo());
        }

        Self {
            num_aircraft,
            num_locations,
            horizon,
            assignments: vec![None; num_variables],
            assigned: FixedBitSet::with_capacity(num_variables),
            num_assigned: 0,
            frontier: vec![0; num_aircraft],
            is_jumbo,
            task_states,
            occupants: vec![0; horizon * num_locations],
            jumbos: vec![0; horizon * num_locations],
        }
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.num_aircraft
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns `true` once every variable holds a location.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.num_variables()
    }

    #[inline]
    pub fn is_assigned(&self, variable: VariableIndex) -> bool {
        debug_assert!(
            variable.get() < self.num_variables(),
            "called `SearchState::is_assigned` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            variable.get()
        );
        self.assigned.contains(variable.get())
    }

    #[inline]
    pub fn assignment(&self, variable: VariableIndex) -> Option<LocationIndex> {
        self.assignments[variable.get()]
    }

    /// The aircraft a variable belongs to.
    #[inline]
    pub fn variable_aircraft(&self, variable: VariableIndex) -> AircraftIndex {
        AircraftIndex::new(variable.get() % self.num_aircraft)
    }

    /// The slot a variable belongs to.
    #[inline]
    pub fn variable_slot(&self, variable: VariableIndex) -> usize {
        variable.get() / self.num_aircraft
    }

    #[inline]
    pub fn variable(&self, aircraft: AircraftIndex, slot: usize) -> VariableIndex {
        VariableIndex::new(slot * self.num_aircraft + aircraft.get())
    }

    /// Number of slots already assigned to `aircraft`, which is also the
    /// slot of its next unassigned variable.
    #[inline]
    pub fn frontier(&self, aircraft: AircraftIndex) -> usize {
        self.frontier[aircraft.get()]
    }

    /// The next unassigned variable of `aircraft`, if any slot is left.
    #[inline]
    pub fn frontier_variable(&self, aircraft: AircraftIndex) -> Option<VariableIndex> {
        let slot = self.frontier(aircraft);
        (slot < self.horizon).then(|| self.variable(aircraft, slot))
    }

    #[inline]
    pub fn is_jumbo(&self, aircraft: AircraftIndex) -> bool {
        self.is_jumbo[aircraft.get()]
    }

    /// Work pending for `aircraft` when `slot` begins.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the state of that slot is not derived yet,
    /// i.e. `slot > frontier(aircraft)`.
    #[inline]
    pub fn task_state(&self, aircraft: AircraftIndex, slot: usize) -> TaskState {
        debug_assert!(
            slot <= self.frontier(aircraft),
            "called `SearchState::task_state` for a slot that is not derived yet: the frontier is {} but the slot is {}",
            self.frontier(aircraft),
            slot
        );
        self.task_states[slot * self.num_aircraft + aircraft.get()]
    }

    /// Occupancy of `slot`.
    #[inline]
    pub fn slot_view(&self, slot: usize) -> SlotView<'_> {
        debug_assert!(
            slot < self.horizon,
            "called `SearchState::slot_view` with slot out of bounds: the len is {} but the index is {}",
            self.horizon,
            slot
        );
        let range = slot * self.num_locations..(slot + 1) * self.num_locations;
        SlotView::new(&self.occupants[range.clone()], &self.jumbos[range])
    }

    /// Places `variable` on `location` and updates the derived occupancy.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the variable is already assigned or is not
    /// its aircraft's frontier variable.
    #[inline]
    pub(crate) fn assign(&mut self, variable: VariableIndex, location: LocationIndex) {
        let aircraft = self.variable_aircraft(variable);
        let slot = self.variable_slot(variable);

        debug_assert!(
            !self.is_assigned(variable),
            "called `SearchState::assign` with already assigned variable: {}",
            variable
        );
        debug_assert_eq!(
            self.frontier(aircraft),
            slot,
            "called `SearchState::assign` with a variable that is not the frontier of {}",
            aircraft
        );

        self.assignments[variable.get()] = Some(location);
        self.assigned.insert(variable.get());
        self.num_assigned += 1;
        self.frontier[aircraft.get()] = slot + 1;

        let cell = slot * self.num_locations + location.get();
        self.occupants[cell] += 1;
        if self.is_jumbo(aircraft) {
            self.jumbos[cell] += 1;
        }
    }

    /// Reverts `assign` for the most recently assigned variable of its aircraft.
    #[inline]
    pub(crate) fn unassign(&mut self, variable: VariableIndex) {
        let aircraft = self.variable_aircraft(variable);
        let slot = self.variable_slot(variable);

        let previous = self.assignments[variable.get()].take();
        debug_assert!(
            previous.is_some(),
            "called `SearchState::unassign` with unassigned variable: {}",
            variable
        );
        let Some(location) = previous else {
            return;
        };
        debug_assert_eq!(
            self.frontier(aircraft),
            slot + 1,
            "called `SearchState::unassign` out of order for {}",
            aircraft
        );

        self.assigned.set(variable.get(), false);
        self.num_assigned -= 1;
        self.frontier[aircraft.get()] = slot;

        let cell = slot * self.num_locations + location.get();
        self.occupants[cell] -= 1;
        if self.is_jumbo(aircraft) {
            self.jumbos[cell] -= 1;
        }
    }

    /// Overwrites the arena entry `(slot, aircraft)` and returns the old value.
    #[inline]
    pub(crate) fn replace_task_state(
        &mut self,
        aircraft: AircraftIndex,
        slot: usize,
        value: TaskState,
    ) -> TaskState {
        debug_assert!(
            slot <= self.horizon,
            "called `SearchState::replace_task_state` with slot out of bounds: the len is {} but the index is {}",
            self.horizon + 1,
            slot
        );
        std::mem::replace(
            &mut self.task_states[slot * self.num_aircraft + aircraft.get()],
            value,
        )
    }

    /// Converts a complete assignment into a `Solution`.
    ///
    /// Returns `None` while any variable is unassigned.
    pub fn to_solution(&self, model: &Model) -> Option<Solution> {
        if !self.is_complete() {
            return None;
        }

        let ids = model.fleet().iter().map(|a| a.id()).collect();
        let locations = self
            .assignments
            .iter()
            .map(|assignment| assignment.map(|l| model.location(l)))
            .collect::<Option<Vec<_>>>()?;

        Some(Solution::new(ids, self.horizon, locations))
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(assigned: {}/{}, aircraft: {}, horizon: {})",
            self.num_assigned,
            self.num_variables(),
            self.num_aircraft,
            self.horizon
        )
    }
}
