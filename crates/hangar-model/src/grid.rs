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

//! Maintenance surface topology.
//!
//! A `Grid` is a `rows x cols` rectangle where each cell is a standard bay,
//! a specialist bay, a parking stand, or unusable. Only the first three kinds
//! become `Location`s that aircraft can occupy; they are numbered by
//! `LocationIndex` in row-major order, which is also the order in which the
//! scheduler tries values.
//!
//! Construction validates the three coordinate lists eagerly. A coordinate
//! outside the grid, or a cell named twice (within one list or across lists),
//! is rejected with a `TopologyError` before anything else is built.

use crate::index::LocationIndex;
use hangar_core::math::coordinate::{Coordinate, GridDimensions};
use smallvec::SmallVec;

/// What a grid cell can be used for.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum LocationKind {
    /// A bay equipped for type-1 work only.
    StandardBay,
    /// A bay equipped for both type-1 and type-2 work.
    SpecialistBay,
    /// A stand where no work is performed.
    Parking,
    /// Not part of the surface.
    #[default]
    Unusable,
}

impl LocationKind {
    /// The three-letter code used by the instance and solution file formats.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            LocationKind::StandardBay => "STD",
            LocationKind::SpecialistBay => "SPC",
            LocationKind::Parking => "PRK",
            LocationKind::Unusable => "---",
        }
    }

    #[inline]
    pub const fn is_usable(&self) -> bool {
        !matches!(self, LocationKind::Unusable)
    }

    /// Returns `true` for standard and specialist bays.
    #[inline]
    pub const fn is_bay(&self) -> bool {
        matches!(self, LocationKind::StandardBay | LocationKind::SpecialistBay)
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationKind::StandardBay => write!(f, "StandardBay"),
            LocationKind::SpecialistBay => write!(f, "SpecialistBay"),
            LocationKind::Parking => write!(f, "Parking"),
            LocationKind::Unusable => write!(f, "Unusable"),
        }
    }
}

/// A usable cell of the grid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Location {
    coordinate: Coordinate,
    kind: LocationKind,
}

impl Location {
    #[inline]
    pub const fn new(coordinate: Coordinate, kind: LocationKind) -> Self {
        Self { coordinate, kind }
    }

    #[inline]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub const fn row(&self) -> usize {
        self.coordinate.row()
    }

    #[inline]
    pub const fn col(&self) -> usize {
        self.coordinate.col()
    }

    #[inline]
    pub const fn kind(&self) -> LocationKind {
        self.kind
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.code(), self.coordinate)
    }
}

/// Largest number of cells (usable or not) a grid may span.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Malformed surface description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("a {rows}x{cols} grid exceeds the limit of {max_cells} cells")]
    TooLarge {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },
    #[error("{kind} at ({row},{col}) lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        kind: LocationKind,
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    #[error("cell ({row},{col}) is declared as {first} and again as {second}")]
    Overlap {
        row: usize,
        col: usize,
        first: LocationKind,
        second: LocationKind,
    },
}

/// The validated maintenance surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    /// Usable location per cell (row-major), `None` for unusable cells.
    cells: Vec<Option<LocationIndex>>,
    /// Usable locations in row-major order.
    locations: Vec<Location>,
    /// Usable orthogonal neighbours per location.
    neighbors: Vec<SmallVec<[LocationIndex; 4]>>,
    /// `true` if the location can never be boxed in: it has no in-bounds
    /// neighbour at all, or one of its in-bounds neighbours is unusable and
    /// therefore always free.
    always_clear: Vec<bool>,
}

impl Grid {
    /// Builds a grid from the three coordinate lists.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::TooLarge` if `rows * cols` overflows or exceeds
    /// [`MAX_GRID_CELLS`], `TopologyError::OutOfBounds` for a coordinate
    /// outside `rows x cols` (negative components included) and
    /// `TopologyError::Overlap` for a cell declared more than once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hangar_model::grid::{Grid, LocationKind};
    /// use hangar_core::math::coordinate::Coordinate;
    ///
    /// let grid = Grid::new(2, 2, &[(0, 0)], &[(1, 1)], &[(0, 1)]).unwrap();
    /// assert_eq!(grid.num_locations(), 3);
    /// assert_eq!(grid.kind_at(Coordinate::new(1, 0)), LocationKind::Unusable);
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        standard_bays: &[(i64, i64)],
        specialist_bays: &[(i64, i64)],
        parkings: &[(i64, i64)],
    ) -> Result<Self, TopologyError> {
        let dimensions = GridDimensions::new(rows, cols);
        let num_cells = dimensions
            .checked_num_cells()
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(TopologyError::TooLarge {
                rows,
                cols,
                max_cells: MAX_GRID_CELLS,
            })?;
        let mut kinds = vec![LocationKind::Unusable; num_cells];

        let lists = [
            (LocationKind::StandardBay, standard_bays),
            (LocationKind::SpecialistBay, specialist_bays),
            (LocationKind::Parking, parkings),
        ];

        for (kind, list) in lists {
            for &(row, col) in list {
                let coordinate =
                    dimensions
                        .checked_coordinate(row, col)
                        .ok_or(TopologyError::OutOfBounds {
                            kind,
                            row,
                            col,
                            rows,
                            cols,
                        })?;

                let cell = &mut kinds[dimensions.index_of(coordinate)];
                if cell.is_usable() {
                    return Err(TopologyError::Overlap {
                        row: coordinate.row(),
                        col: coordinate.col(),
                        first: *cell,
                        second: kind,
                    });
                }
                *cell = kind;
            }
        }

        Ok(Self::from_cell_kinds(dimensions, &kinds))
    }

    fn from_cell_kinds(dimensions: GridDimensions, kinds: &[LocationKind]) -> Self {
        let mut cells = vec![None; kinds.len()];
        let mut locations = Vec::new();

        for (cell_index, &kind) in kinds.iter().enumerate() {
            if kind.is_usable() {
                cells[cell_index] = Some(LocationIndex::new(locations.len()));
                locations.push(Location::new(dimensions.coordinate_of(cell_index), kind));
            }
        }

        let mut neighbors = Vec::with_capacity(locations.len());
        let mut always_clear = Vec::with_capacity(locations.len());

        for location in &locations {
            let around = dimensions.orthogonal_neighbors(location.coordinate());
            let usable: SmallVec<[LocationIndex; 4]> = around
                .iter()
                .filter_map(|&n| cells[dimensions.index_of(n)])
                .collect();

            always_clear.push(around.is_empty() || usable.len() < around.len());
            neighbors.push(usable);
        }

        Self {
            dimensions,
            cells,
            locations,
            neighbors,
            always_clear,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dimensions.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dimensions.cols()
    }

    /// Number of usable locations.
    #[inline]
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Usable locations in row-major order.
    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns the location with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_locations()`.
    #[inline]
    pub fn location(&self, index: LocationIndex) -> Location {
        debug_assert!(
            index.get() < self.num_locations(),
            "called `Grid::location` with location index out of bounds: the len is {} but the index is {}",
            self.num_locations(),
            index.get()
        );
        self.locations[index.get()]
    }

    /// Returns the usable location at `coordinate`, if any.
    #[inline]
    pub fn location_at(&self, coordinate: Coordinate) -> Option<LocationIndex> {
        if !self.dimensions.contains(coordinate) {
            return None;
        }
        self.cells[self.dimensions.index_of(coordinate)]
    }

    /// Returns the kind of the cell at `coordinate`. Cells outside the grid
    /// are reported as `Unusable`.
    #[inline]
    pub fn kind_at(&self, coordinate: Coordinate) -> LocationKind {
        self.location_at(coordinate)
            .map_or(LocationKind::Unusable, |index| self.locations[index.get()].kind())
    }

    /// Usable orthogonal neighbours of `index`.
    #[inline]
    pub fn neighbors(&self, index: LocationIndex) -> &[LocationIndex] {
        debug_assert!(
            index.get() < self.num_locations(),
            "called `Grid::neighbors` with location index out of bounds: the len is {} but the index is {}",
            self.num_locations(),
            index.get()
        );
        &self.neighbors[index.get()]
    }

    /// Returns `true` if `index` satisfies maneuvering clearance no matter
    /// how the surrounding locations are occupied.
    #[inline]
    pub fn is_always_clear(&self, index: LocationIndex) -> bool {
        debug_assert!(
            index.get() < self.num_locations(),
            "called `Grid::is_always_clear` with location index out of bounds: the len is {} but the index is {}",
            self.num_locations(),
            index.get()
        );
        self.always_clear[index.get()]
    }

    /// Returns `true` if the two locations share an edge.
    #[inline]
    pub fn are_adjacent(&self, a: LocationIndex, b: LocationIndex) -> bool {
        GridDimensions::are_adjacent(
            self.location(a).coordinate(),
            self.location(b).coordinate(),
        )
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows() {
            let line: Vec<&str> = (0..self.cols())
                .map(|col| self.kind_at(Coordinate::new(row, col)).code())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
