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

//! Independent check of complete schedules.
//!
//! `validate` re-evaluates every rule on a finished `Solution` from scratch,
//! without any of the engine's incremental bookkeeping. It is what the tests
//! and the command line tool use to confirm that emitted schedules hold.

use crate::constraints::{capacity_ok, clearance_ok, compatibility_ok, jumbo_separation_ok, SlotView};
use hangar_model::{
    fleet::AircraftId,
    grid::Location,
    index::{AircraftIndex, LocationIndex},
    model::Model,
    solution::Solution,
    task::TaskState,
};

/// The first broken rule found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error(
        "schedule covers {aircraft} aircraft over {horizon} slots, the model has {expected_aircraft} aircraft over {expected_horizon} slots"
    )]
    ShapeMismatch {
        aircraft: usize,
        horizon: usize,
        expected_aircraft: usize,
        expected_horizon: usize,
    },
    #[error("schedule lists aircraft {found} where the fleet has {expected}")]
    AircraftMismatch {
        found: AircraftId,
        expected: AircraftId,
    },
    #[error("aircraft {id} is placed on {location} in slot {slot}, which is not a location of the grid")]
    UnknownLocation {
        id: AircraftId,
        slot: usize,
        location: Location,
    },
    #[error("{location} holds {occupants} aircraft ({jumbos} jumbo) in slot {slot}")]
    Capacity {
        slot: usize,
        location: Location,
        occupants: u8,
        jumbos: u8,
    },
    #[error("aircraft {id} with {state} cannot use {location} in slot {slot}")]
    Incompatible {
        id: AircraftId,
        slot: usize,
        location: Location,
        state: TaskState,
    },
    #[error("{location} has no free neighbour in slot {slot}")]
    Clearance { slot: usize, location: Location },
    #[error("jumbos on adjacent locations {first} and {second} in slot {slot}")]
    JumboSeparation {
        slot: usize,
        first: Location,
        second: Location,
    },
}

/// Task states implied by `solution`, per aircraft index, for slots
/// `0..=horizon`. Entry `t` is the work pending when slot `t` begins.
///
/// # Panics
///
/// Panics if `solution` does not cover the model's fleet and horizon.
pub fn derive_task_states(model: &Model, solution: &Solution) -> Vec<Vec<TaskState>> {
    assert!(
        solution.num_aircraft() == model.num_aircraft() && solution.horizon() == model.horizon(),
        "called `derive_task_states` with a solution of a different shape: {} aircraft x {} slots, expected {} x {}",
        solution.num_aircraft(),
        solution.horizon(),
        model.num_aircraft(),
        model.horizon()
    );

    AircraftIndex::range(model.num_aircraft())
        .map(|aircraft| {
            let mut states = Vec::with_capacity(model.horizon() + 1);
            let mut current = model.initial_task_state(aircraft);
            states.push(current);
            for location in solution.itinerary(aircraft) {
                current = current.consume(location.kind());
                states.push(current);
            }
            states
        })
        .collect()
}

/// Checks `solution` against every rule of `model`.
///
/// # Errors
///
/// Returns the first `Violation` found, scanning slot by slot.
pub fn validate(model: &Model, solution: &Solution) -> Result<(), Violation> {
    if solution.num_aircraft() != model.num_aircraft() || solution.horizon() != model.horizon() {
        return Err(Violation::ShapeMismatch {
            aircraft: solution.num_aircraft(),
            horizon: solution.horizon(),
            expected_aircraft: model.num_aircraft(),
            expected_horizon: model.horizon(),
        });
    }

    for (aircraft, &found) in model.fleet().iter().zip(solution.aircraft_ids()) {
        if aircraft.id() != found {
            return Err(Violation::AircraftMismatch {
                found,
                expected: aircraft.id(),
            });
        }
    }

    let grid = model.grid();
    let num_locations = grid.num_locations();
    let mut occupants = vec![0u8; num_locations];
    let mut jumbos = vec![0u8; num_locations];

    let task_states = derive_task_states(model, solution);

    for slot in 0..model.horizon() {
        occupants.fill(0);
        jumbos.fill(0);

        for aircraft in AircraftIndex::range(model.num_aircraft()) {
            let location = solution.location(aircraft, slot);
            let spec = model.aircraft(aircraft);

            let index = match grid.location_at(location.coordinate()) {
                Some(index) if grid.location(index) == location => index,
                _ => {
                    return Err(Violation::UnknownLocation {
                        id: spec.id(),
                        slot,
                        location,
                    });
                }
            };

            let state = task_states[aircraft.get()][slot];
            if !compatibility_ok(state, location.kind()) {
                return Err(Violation::Incompatible {
                    id: spec.id(),
                    slot,
                    location,
                    state,
                });
            }

            occupants[index.get()] = occupants[index.get()].saturating_add(1);
            if spec.is_jumbo() {
                jumbos[index.get()] = jumbos[index.get()].saturating_add(1);
            }
        }

        let view = SlotView::new(&occupants, &jumbos);
        for index in LocationIndex::range(num_locations) {
            let location = grid.location(index);
            if !capacity_ok(view.occupants(index), view.jumbos(index)) {
                return Err(Violation::Capacity {
                    slot,
                    location,
                    occupants: view.occupants(index),
                    jumbos: view.jumbos(index),
                });
            }
            if !clearance_ok(grid, &view, index) {
                return Err(Violation::Clearance { slot, location });
            }
            if !jumbo_separation_ok(grid, &view, index) {
                let second = grid
                    .neighbors(index)
                    .iter()
                    .find(|&&n| view.jumbos(n) > 0)
                    .map(|&n| grid.location(n))
                    .unwrap_or(location);
                return Err(Violation::JumboSeparation {
                    slot,
                    first: location,
                    second,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::math::coordinate::Coordinate;
    use hangar_model::{
        fleet::AircraftSpec,
        grid::LocationKind,
        model::{build_model, ModelBuilder},
    };

    fn loc(kind: LocationKind, r: usize, c: usize) -> Location {
        Location::new(Coordinate::new(r, c), kind)
    }

    fn parking_row(cols: usize, aircraft: &[AircraftSpec]) -> Model {
        let mut b = ModelBuilder::new(1, cols);
        b.set_horizon(1).fill_parking();
        for spec in aircraft {
            b.add_aircraft(*spec);
        }
        b.build().unwrap()
    }

    #[test]
    fn test_valid_schedule_passes() {
        let m = parking_row(
            2,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let p = loc(LocationKind::Parking, 0, 0);
        let s = Solution::new(vec![1, 2], 1, vec![p, p]);
        assert_eq!(validate(&m, &s), Ok(()));
    }

    #[test]
    fn test_shape_and_ids_are_checked() {
        let m = parking_row(1, &[AircraftSpec::standard(1, 0, 0)]);
        let p = loc(LocationKind::Parking, 0, 0);

        let wrong_horizon = Solution::new(vec![1], 2, vec![p, p]);
        assert!(matches!(
            validate(&m, &wrong_horizon),
            Err(Violation::ShapeMismatch { .. })
        ));

        let wrong_id = Solution::new(vec![9], 1, vec![p]);
        assert_eq!(
            validate(&m, &wrong_id),
            Err(Violation::AircraftMismatch {
                found: 9,
                expected: 1
            })
        );
    }

    #[test]
    fn test_unknown_location() {
        let m = parking_row(1, &[AircraftSpec::standard(1, 0, 0)]);
        let s = Solution::new(vec![1], 1, vec![loc(LocationKind::StandardBay, 0, 0)]);
        assert!(matches!(
            validate(&m, &s),
            Err(Violation::UnknownLocation { id: 1, slot: 0, .. })
        ));
    }

    #[test]
    fn test_capacity_violation() {
        let m = parking_row(
            2,
            &[AircraftSpec::jumbo(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let p = loc(LocationKind::Parking, 0, 1);
        let s = Solution::new(vec![1, 2], 1, vec![p, p]);
        assert_eq!(
            validate(&m, &s),
            Err(Violation::Capacity {
                slot: 0,
                location: p,
                occupants: 2,
                jumbos: 1
            })
        );
    }

    #[test]
    fn test_clearance_violation() {
        let m = parking_row(
            2,
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(2, 0, 0)],
        );
        let s = Solution::new(
            vec![1, 2],
            1,
            vec![loc(LocationKind::Parking, 0, 0), loc(LocationKind::Parking, 0, 1)],
        );
        assert!(matches!(
            validate(&m, &s),
            Err(Violation::Clearance { slot: 0, .. })
        ));
    }

    #[test]
    fn test_jumbo_separation_violation() {
        let m = parking_row(
            3,
            &[AircraftSpec::jumbo(1, 0, 0), AircraftSpec::jumbo(2, 0, 0)],
        );
        let a = loc(LocationKind::Parking, 0, 0);
        let b = loc(LocationKind::Parking, 0, 1);
        let s = Solution::new(vec![1, 2], 1, vec![a, b]);
        // On a single row (0,0) loses its only neighbour, so clearance fails first.
        assert!(validate(&m, &s).is_err());

        let wide = build_model(
            2,
            3,
            &[],
            &[],
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)],
            &[AircraftSpec::jumbo(1, 0, 0), AircraftSpec::jumbo(2, 0, 0)],
            1,
        )
        .unwrap();
        let s = Solution::new(vec![1, 2], 1, vec![a, b]);
        assert_eq!(
            validate(&wide, &s),
            Err(Violation::JumboSeparation {
                slot: 0,
                first: a,
                second: b
            })
        );
    }

    #[test]
    fn test_incompatible_placement() {
        let m = build_model(
            1,
            2,
            &[(0, 0)],
            &[],
            &[(0, 1)],
            &[AircraftSpec::standard(1, 1, 0)],
            2,
        )
        .unwrap();
        let bay = loc(LocationKind::StandardBay, 0, 0);
        let park = loc(LocationKind::Parking, 0, 1);

        assert_eq!(validate(&m, &Solution::new(vec![1], 2, vec![bay, park])), Ok(()));
        assert!(matches!(
            validate(&m, &Solution::new(vec![1], 2, vec![park, park])),
            Err(Violation::Incompatible { id: 1, slot: 0, .. })
        ));
        // Work is done after one slot, so the bay is no longer admissible.
        assert!(matches!(
            validate(&m, &Solution::new(vec![1], 2, vec![bay, bay])),
            Err(Violation::Incompatible { id: 1, slot: 1, .. })
        ));
    }

    #[test]
    fn test_derive_task_states() {
        let m = build_model(
            1,
            2,
            &[],
            &[(0, 0)],
            &[(0, 1)],
            &[AircraftSpec::standard(1, 1, 1)],
            3,
        )
        .unwrap();
        let spc = loc(LocationKind::SpecialistBay, 0, 0);
        let park = loc(LocationKind::Parking, 0, 1);
        let s = Solution::new(vec![1], 3, vec![spc, spc, park]);
        assert_eq!(
            derive_task_states(&m, &s),
            vec![vec![
                TaskState::new(1, 1),
                TaskState::new(1, 0),
                TaskState::new(0, 0),
                TaskState::new(0, 0)
            ]]
        );
    }
}
