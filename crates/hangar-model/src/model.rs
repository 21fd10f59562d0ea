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

//! The immutable scheduling model.
//!
//! A `Model` bundles the validated `Grid`, the id-sorted `Fleet` and the
//! planning horizon. It also fixes the variable layout used by every solver:
//! one variable `loc(a, t)` per aircraft and slot, stored slot-major so that
//! variable `t * num_aircraft + a` belongs to aircraft index `a` at slot `t`.
//!
//! Models are created either through [`build_model`], which mirrors the flat
//! description produced by the instance loader, or through the fluent
//! [`ModelBuilder`]. Both validate eagerly and never hand out a model that
//! violates the topology or fleet rules.

use crate::{
    fleet::{Aircraft, AircraftSpec, Fleet, FleetError},
    grid::{Grid, Location, MAX_GRID_CELLS, TopologyError},
    index::{AircraftIndex, LocationIndex, VariableIndex},
    task::TaskState,
};

/// Reasons a model cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    #[error("invalid fleet: {0}")]
    InvalidFleet(#[from] FleetError),
}

/// A validated scheduling problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    grid: Grid,
    fleet: Fleet,
    horizon: usize,
}

impl Model {
    /// Assembles a model from already validated parts.
    #[inline]
    pub fn new(grid: Grid, fleet: Fleet, horizon: usize) -> Self {
        Self {
            grid,
            fleet,
            horizon,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Number of time slots.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.fleet.len()
    }

    #[inline]
    pub fn num_locations(&self) -> usize {
        self.grid.num_locations()
    }

    /// Number of `loc(a, t)` variables, `num_aircraft * horizon`.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_aircraft() * self.horizon
    }

    #[inline]
    pub fn aircraft(&self, index: AircraftIndex) -> &Aircraft {
        self.fleet.get(index)
    }

    #[inline]
    pub fn location(&self, index: LocationIndex) -> Location {
        self.grid.location(index)
    }

    /// The work pending for `aircraft` before the first slot.
    #[inline]
    pub fn initial_task_state(&self, aircraft: AircraftIndex) -> TaskState {
        let a = self.fleet.get(aircraft);
        TaskState::new(a.type1_tasks(), a.type2_tasks())
    }

    /// The variable holding `loc(aircraft, slot)`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `aircraft` or `slot` is out of range.
    #[inline]
    pub fn variable(&self, aircraft: AircraftIndex, slot: usize) -> VariableIndex {
        debug_assert!(
            aircraft.get() < self.num_aircraft(),
            "called `Model::variable` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            aircraft.get()
        );
        debug_assert!(
            slot < self.horizon,
            "called `Model::variable` with slot out of bounds: the len is {} but the index is {}",
            self.horizon,
            slot
        );
        VariableIndex::new(slot * self.num_aircraft() + aircraft.get())
    }

    /// The aircraft a variable belongs to.
    #[inline]
    pub fn variable_aircraft(&self, variable: VariableIndex) -> AircraftIndex {
        AircraftIndex::new(variable.get() % self.num_aircraft())
    }

    /// The slot a variable belongs to.
    #[inline]
    pub fn variable_slot(&self, variable: VariableIndex) -> usize {
        variable.get() / self.num_aircraft()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(grid: {}, locations: {}, aircraft: {}, horizon: {})",
            self.grid.dimensions(),
            self.num_locations(),
            self.num_aircraft(),
            self.horizon
        )
    }
}

/// Builds and validates a model from its flat description.
///
/// Coordinates are `(row, col)` pairs and may be negative; anything outside
/// the `rows x cols` grid is reported rather than silently dropped.
///
/// # Errors
///
/// - `ModelError::InvalidTopology` for out-of-bounds or overlapping
///   coordinates.
/// - `ModelError::InvalidFleet` for duplicate ids or invalid task counts.
///
/// # Examples
///
/// ```rust
/// use hangar_model::{fleet::AircraftSpec, model::build_model};
///
/// let model = build_model(1, 1, &[], &[(0, 0)], &[], &[AircraftSpec::standard(1, 0, 1)], 1).unwrap();
/// assert_eq!(model.num_variables(), 1);
/// ```
pub fn build_model(
    rows: usize,
    cols: usize,
    standard_bays: &[(i64, i64)],
    specialist_bays: &[(i64, i64)],
    parkings: &[(i64, i64)],
    aircraft: &[AircraftSpec],
    horizon: usize,
) -> Result<Model, ModelError> {
    let grid = Grid::new(rows, cols, standard_bays, specialist_bays, parkings)?;
    let fleet = Fleet::new(aircraft)?;
    Ok(Model::new(grid, fleet, horizon))
}

/// A fluent builder for `Model`.
///
/// # Examples
///
/// ```rust
/// use hangar_model::{fleet::AircraftSpec, model::ModelBuilder};
///
/// let mut builder = ModelBuilder::new(2, 2);
/// builder
///     .set_horizon(3)
///     .add_standard_bay(0, 0)
///     .add_specialist_bay(0, 1)
///     .add_parking(1, 0)
///     .add_aircraft(AircraftSpec::jumbo(5, 1, 1));
///
/// let model = builder.build().unwrap();
/// assert_eq!(model.num_locations(), 3);
/// assert_eq!(model.num_variables(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    rows: usize,
    cols: usize,
    horizon: usize,
    standard_bays: Vec<(i64, i64)>,
    specialist_bays: Vec<(i64, i64)>,
    parkings: Vec<(i64, i64)>,
    aircraft: Vec<AircraftSpec>,
}

impl ModelBuilder {
    /// Creates a builder for a `rows x cols` grid with an empty horizon.
    #[inline]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    #[inline]
    pub fn set_horizon(&mut self, horizon: usize) -> &mut Self {
        self.horizon = horizon;
        self
    }

    #[inline]
    pub fn add_standard_bay(&mut self, row: i64, col: i64) -> &mut Self {
        self.standard_bays.push((row, col));
        self
    }

    #[inline]
    pub fn add_specialist_bay(&mut self, row: i64, col: i64) -> &mut Self {
        self.specialist_bays.push((row, col));
        self
    }

    #[inline]
    pub fn add_parking(&mut self, row: i64, col: i64) -> &mut Self {
        self.parkings.push((row, col));
        self
    }

    /// Marks every cell of the grid that has not been declared yet as
    /// parking. Does nothing for a grid `build` would reject as too large.
    pub fn fill_parking(&mut self) -> &mut Self {
        let fits = self
            .rows
            .checked_mul(self.cols)
            .is_some_and(|n| n <= MAX_GRID_CELLS);
        if !fits {
            return self;
        }

        let declared: rustc_hash::FxHashSet<(i64, i64)> = self
            .standard_bays
            .iter()
            .chain(&self.specialist_bays)
            .chain(&self.parkings)
            .copied()
            .collect();

        for row in 0..self.rows as i64 {
            for col in 0..self.cols as i64 {
                if !declared.contains(&(row, col)) {
                    self.parkings.push((row, col));
                }
            }
        }
        self
    }

    #[inline]
    pub fn add_aircraft(&mut self, aircraft: AircraftSpec) -> &mut Self {
        self.aircraft.push(aircraft);
        self
    }

    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.aircraft.len()
    }

    /// Validates the collected description and builds the model.
    ///
    /// # Errors
    ///
    /// See [`build_model`].
    pub fn build(self) -> Result<Model, ModelError> {
        build_model(
            self.rows,
            self.cols,
            &self.standard_bays,
            &self.specialist_bays,
            &self.parkings,
            &self.aircraft,
            self.horizon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fleet::FleetError, grid::LocationKind};
    use hangar_core::math::coordinate::Coordinate;

    #[test]
    fn test_variable_layout_is_slot_major() {
        let mut b = ModelBuilder::new(1, 3);
        b.set_horizon(2)
            .fill_parking()
            .add_aircraft(AircraftSpec::standard(30, 0, 0))
            .add_aircraft(AircraftSpec::standard(10, 0, 0))
            .add_aircraft(AircraftSpec::standard(20, 0, 0));
        let model = b.build().unwrap();

        assert_eq!(model.num_variables(), 6);
        let v = model.variable(AircraftIndex::new(2), 1);
        assert_eq!(v.get(), 5);
        assert_eq!(model.variable_aircraft(v), AircraftIndex::new(2));
        assert_eq!(model.variable_slot(v), 1);

        // Index 0 is the smallest id.
        assert_eq!(model.aircraft(AircraftIndex::new(0)).id(), 10);
    }

    #[test]
    fn test_initial_task_state_comes_from_fleet() {
        let model = build_model(1, 1, &[(0, 0)], &[], &[], &[AircraftSpec::jumbo(1, 4, 2)], 1).unwrap();
        assert_eq!(model.initial_task_state(AircraftIndex::new(0)), TaskState::new(4, 2));
    }

    #[test]
    fn test_standard_bay_outside_grid_is_invalid_topology() {
        let err = build_model(2, 2, &[(5, 5)], &[], &[], &[AircraftSpec::standard(1, 1, 0)], 1)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTopology(TopologyError::OutOfBounds { .. })));
    }

    #[test]
    fn test_oversized_grid_is_invalid_topology() {
        let err = build_model(usize::MAX, 2, &[(0, 0)], &[], &[], &[], 1).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTopology(TopologyError::TooLarge { .. })));

        let mut b = ModelBuilder::new(100_000, 100_000);
        b.fill_parking();
        assert!(matches!(
            b.build(),
            Err(ModelError::InvalidTopology(TopologyError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_fleet_errors_are_wrapped() {
        let err = build_model(
            1,
            1,
            &[],
            &[],
            &[(0, 0)],
            &[AircraftSpec::standard(1, 0, 0), AircraftSpec::standard(1, 0, 0)],
            1,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::InvalidFleet(FleetError::DuplicateId { id: 1 }));
        assert!(err.to_string().starts_with("invalid fleet"));
    }

    #[test]
    fn test_topology_is_checked_before_fleet() {
        let err = build_model(
            1,
            1,
            &[(1, 0)],
            &[],
            &[],
            &[AircraftSpec::standard(1, -1, 0)],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTopology(_)));
    }

    #[test]
    fn test_fill_parking_respects_declared_cells() {
        let mut b = ModelBuilder::new(2, 2);
        b.add_specialist_bay(1, 1).fill_parking();
        let model = b.build().unwrap();
        assert_eq!(model.num_locations(), 4);
        assert_eq!(model.grid().kind_at(Coordinate::new(1, 1)), LocationKind::SpecialistBay);
        assert_eq!(model.grid().kind_at(Coordinate::new(0, 0)), LocationKind::Parking);
    }

    #[test]
    fn test_empty_model_is_valid() {
        let model = ModelBuilder::new(0, 0).build().unwrap();
        assert_eq!(model.num_variables(), 0);
        assert_eq!(model.to_string(), "Model(grid: 0x0, locations: 0, aircraft: 0, horizon: 0)");
    }
}
