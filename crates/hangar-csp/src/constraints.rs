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

//! Feasibility predicates.
//!
//! Every rule is a pure function over a [`SlotView`], the per-location
//! occupant and jumbo counts of one time slot, or over a single aircraft's
//! `TaskState`. None of them look at more than one slot, and the only
//! cross-slot rule (work consumption) lives in `TaskState::consume`.
//!
//! All slot-local rules are monotone: adding an occupant can turn a passing
//! location into a failing one but never the other way round. That makes it
//! sound to evaluate them on partially filled slots ("not violated yet"
//! passes) and to discard a placement as soon as it fails, which is what
//! [`placement_is_consistent`] does for the search engine.

use hangar_model::{
    grid::{Grid, LocationKind},
    index::LocationIndex,
    task::TaskState,
};

/// Maximum number of aircraft sharing one location.
pub const LOCATION_CAPACITY: u8 = 2;

/// Maximum number of jumbo aircraft on one location.
pub const JUMBO_CAPACITY: u8 = 1;

/// Read-only occupancy of one time slot, indexed by `LocationIndex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView<'a> {
    occupants: &'a [u8],
    jumbos: &'a [u8],
}

impl<'a> SlotView<'a> {
    /// Creates a view from per-location occupant and jumbo counts.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn new(occupants: &'a [u8], jumbos: &'a [u8]) -> Self {
        assert_eq!(
            occupants.len(),
            jumbos.len(),
            "called `SlotView::new` with inconsistent lengths: occupants.len() = {}, jumbos.len() = {}",
            occupants.len(),
            jumbos.len()
        );
        Self { occupants, jumbos }
    }

    #[inline(always)]
    pub fn occupants(&self, location: LocationIndex) -> u8 {
        self.occupants[location.get()]
    }

    #[inline(always)]
    pub fn jumbos(&self, location: LocationIndex) -> u8 {
        self.jumbos[location.get()]
    }

    #[inline(always)]
    pub fn is_occupied(&self, location: LocationIndex) -> bool {
        self.occupants(location) > 0
    }

    #[inline]
    pub fn num_locations(&self) -> usize {
        self.occupants.len()
    }
}

/// At most two occupants, at most one jumbo, and a jumbo never shares.
#[inline(always)]
pub const fn capacity_ok(occupants: u8, jumbos: u8) -> bool {
    occupants <= LOCATION_CAPACITY && jumbos <= JUMBO_CAPACITY && (jumbos == 0 || occupants <= 1)
}

/// Pending work decides the admissible location kind.
#[inline(always)]
pub const fn compatibility_ok(state: TaskState, kind: LocationKind) -> bool {
    state.accepts(kind)
}

/// An occupied location keeps at least one free orthogonal neighbour.
///
/// Unoccupied locations pass trivially. Unusable neighbour cells count as
/// free, and a location without any in-bounds neighbour always passes.
#[inline]
pub fn clearance_ok(grid: &Grid, view: &SlotView<'_>, location: LocationIndex) -> bool {
    !view.is_occupied(location)
        || grid.is_always_clear(location)
        || grid
            .neighbors(location)
            .iter()
            .any(|&n| !view.is_occupied(n))
}

/// No jumbo sits orthogonally next to another jumbo.
#[inline]
pub fn jumbo_separation_ok(grid: &Grid, view: &SlotView<'_>, location: LocationIndex) -> bool {
    view.jumbos(location) == 0
        || grid
            .neighbors(location)
            .iter()
            .all(|&n| view.jumbos(n) == 0)
}

/// Evaluates every slot-local rule at every location of the slot.
pub fn slot_is_consistent(grid: &Grid, view: &SlotView<'_>) -> bool {
    LocationIndex::range(view.num_locations()).all(|location| {
        capacity_ok(view.occupants(location), view.jumbos(location))
            && clearance_ok(grid, view, location)
            && jumbo_separation_ok(grid, view, location)
    })
}

/// Whether one more aircraft can be placed on `location` without breaking a
/// slot-local rule.
///
/// `view` must describe a slot that is consistent on its own. Only the rules
/// whose outcome can change are evaluated: capacity and separation at
/// `location`, clearance at `location`, and clearance at its occupied
/// neighbours (which lose `location` as a free cell). The result equals
/// `slot_is_consistent` on the slot with the extra occupant.
pub fn placement_is_consistent(
    grid: &Grid,
    view: &SlotView<'_>,
    location: LocationIndex,
    is_jumbo: bool,
) -> bool {
    debug_assert!(
        location.get() < view.num_locations(),
        "called `placement_is_consistent` with location index out of bounds: the len is {} but the index is {}",
        view.num_locations(),
        location.get()
    );

    let occupants = view.occupants(location).saturating_add(1);
    let jumbos = view.jumbos(location) + u8::from(is_jumbo);
    if !capacity_ok(occupants, jumbos) {
        return false;
    }

    let neighbors = grid.neighbors(location);

    if is_jumbo && neighbors.iter().any(|&n| view.jumbos(n) > 0) {
        return false;
    }

    if !grid.is_always_clear(location) && neighbors.iter().all(|&n| view.is_occupied(n)) {
        return false;
    }

    // Neighbours only lose a free cell if `location` was empty before.
    if view.is_occupied(location) {
        return true;
    }

    neighbors.iter().all(|&n| {
        !view.is_occupied(n)
            || grid.is_always_clear(n)
            || grid
                .neighbors(n)
                .iter()
                .any(|&m| m != location && !view.is_occupied(m))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::math::coordinate::Coordinate;

    /// Mutable occupancy for exercising the predicates.
    struct Slot {
        occupants: Vec<u8>,
        jumbos: Vec<u8>,
    }

    impl Slot {
        fn new(grid: &Grid) -> Self {
            Self {
                occupants: vec![0; grid.num_locations()],
                jumbos: vec![0; grid.num_locations()],
            }
        }

        fn place(&mut self, location: LocationIndex, jumbo: bool) {
            self.occupants[location.get()] += 1;
            self.jumbos[location.get()] += u8::from(jumbo);
        }

        fn view(&self) -> SlotView<'_> {
            SlotView::new(&self.occupants, &self.jumbos)
        }
    }

    fn full_grid(rows: usize, cols: usize) -> Grid {
        let cells: Vec<(i64, i64)> = (0..rows as i64)
            .flat_map(|r| (0..cols as i64).map(move |c| (r, c)))
            .collect();
        Grid::new(rows, cols, &[], &[], &cells).unwrap()
    }

    fn at(grid: &Grid, r: usize, c: usize) -> LocationIndex {
        grid.location_at(Coordinate::new(r, c)).unwrap()
    }

    #[test]
    fn test_capacity_table() {
        assert!(capacity_ok(0, 0));
        assert!(capacity_ok(1, 0));
        assert!(capacity_ok(2, 0));
        assert!(!capacity_ok(3, 0));
        assert!(capacity_ok(1, 1));
        assert!(!capacity_ok(2, 1));
        assert!(!capacity_ok(2, 2));
    }

    #[test]
    fn test_clearance_on_boxed_in_location() {
        let grid = full_grid(1, 3);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 1), false);
        assert!(clearance_ok(&grid, &slot.view(), at(&grid, 0, 1)));

        slot.place(at(&grid, 0, 0), false);
        assert!(clearance_ok(&grid, &slot.view(), at(&grid, 0, 1)));
        // (0,0) has a single neighbour, now occupied.
        assert!(!clearance_ok(&grid, &slot.view(), at(&grid, 0, 0)));
    }

    #[test]
    fn test_clearance_ignores_unoccupied_locations() {
        let grid = full_grid(1, 2);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), false);
        assert!(clearance_ok(&grid, &slot.view(), at(&grid, 0, 1)));
    }

    #[test]
    fn test_isolated_cell_is_always_clear() {
        let grid = full_grid(1, 1);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), false);
        slot.place(at(&grid, 0, 0), false);
        assert!(slot_is_consistent(&grid, &slot.view()));
    }

    #[test]
    fn test_jumbo_separation() {
        let grid = full_grid(2, 2);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), true);
        slot.place(at(&grid, 1, 1), true);
        // Diagonal jumbos are fine.
        assert!(jumbo_separation_ok(&grid, &slot.view(), at(&grid, 0, 0)));

        slot.place(at(&grid, 0, 1), true);
        assert!(!jumbo_separation_ok(&grid, &slot.view(), at(&grid, 0, 1)));
        assert!(!jumbo_separation_ok(&grid, &slot.view(), at(&grid, 0, 0)));
    }

    #[test]
    fn test_placement_rejects_capacity_and_jumbo_sharing() {
        let grid = full_grid(1, 3);
        let mut slot = Slot::new(&grid);
        let mid = at(&grid, 0, 1);

        slot.place(mid, true);
        assert!(!placement_is_consistent(&grid, &slot.view(), mid, false));
        assert!(!placement_is_consistent(&grid, &slot.view(), mid, true));

        let mut slot = Slot::new(&grid);
        slot.place(mid, false);
        assert!(placement_is_consistent(&grid, &slot.view(), mid, false));
        assert!(!placement_is_consistent(&grid, &slot.view(), mid, true));
        slot.place(mid, false);
        assert!(!placement_is_consistent(&grid, &slot.view(), mid, false));
    }

    #[test]
    fn test_placement_rejects_adjacent_jumbo() {
        let grid = full_grid(1, 3);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), true);
        assert!(!placement_is_consistent(&grid, &slot.view(), at(&grid, 0, 1), true));
        assert!(placement_is_consistent(&grid, &slot.view(), at(&grid, 0, 2), true));
    }

    #[test]
    fn test_placement_rejects_boxing_in_a_neighbour() {
        // (0,0) occupied; placing at (0,1) would leave (0,0) without a free neighbour.
        let grid = full_grid(1, 3);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), false);
        assert!(!placement_is_consistent(&grid, &slot.view(), at(&grid, 0, 1), false));
        // Sharing (0,0) itself is fine, (0,1) stays free.
        assert!(placement_is_consistent(&grid, &slot.view(), at(&grid, 0, 0), false));
    }

    #[test]
    fn test_placement_rejects_boxing_in_itself() {
        let grid = full_grid(1, 3);
        let mut slot = Slot::new(&grid);
        slot.place(at(&grid, 0, 0), false);
        slot.place(at(&grid, 0, 2), false);
        assert!(!placement_is_consistent(&grid, &slot.view(), at(&grid, 0, 1), false));
    }

    #[test]
    fn test_placement_agrees_with_full_evaluation() {
        // Exhaustive over every occupancy of a 2x3 grid with up to one aircraft per cell
        // (jumbo or standard), and every candidate placement.
        let grid = full_grid(2, 3);
        let n = grid.num_locations();
        let mut configs = 0usize;

        for mask in 0..3usize.pow(n as u32) {
            let mut slot = Slot::new(&grid);
            let mut m = mask;
            for i in 0..n {
                match m % 3 {
                    1 => slot.place(LocationIndex::new(i), false),
                    2 => slot.place(LocationIndex::new(i), true),
                    _ => {}
                }
                m /= 3;
            }
            if !slot_is_consistent(&grid, &slot.view()) {
                continue;
            }
            configs += 1;

            for i in 0..n {
                for jumbo in [false, true] {
                    let location = LocationIndex::new(i);
                    let predicted = placement_is_consistent(&grid, &slot.view(), location, jumbo);

                    let mut after = Slot {
                        occupants: slot.occupants.clone(),
                        jumbos: slot.jumbos.clone(),
                    };
                    after.place(location, jumbo);
                    let actual = slot_is_consistent(&grid, &after.view());

                    assert_eq!(predicted, actual, "mask {} location {} jumbo {}", mask, i, jumbo);
                }
            }
        }

        assert!(configs > 1);
    }
}
