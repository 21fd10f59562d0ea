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

//! # Grid Coordinates
//!
//! `Coordinate` names a single cell of a rectangular grid and
//! `GridDimensions` knows which cells exist. Cells are ordered row-major,
//! `(0,0) < (0,1) < ... < (1,0)`, and the derived `Ord` on `Coordinate`
//! follows the same order so sorting coordinates yields the canonical
//! value order of the scheduler.
//!
//! Neighbourhoods are orthogonal only (up, left, right, down). Diagonal
//! cells never count as adjacent.
//!
//! ```rust
//! use hangar_core::math::coordinate::{Coordinate, GridDimensions};
//!
//! let dims = GridDimensions::new(3, 3);
//! let centre = Coordinate::new(1, 1);
//! assert_eq!(dims.orthogonal_neighbors(centre).len(), 4);
//! assert_eq!(dims.orthogonal_neighbors(Coordinate::new(0, 0)).len(), 2);
//! ```

use smallvec::SmallVec;

/// A cell position on the grid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[inline(always)]
    pub const fn col(&self) -> usize {
        self.col
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Up to four orthogonal neighbours, stored inline.
pub type Neighborhood = SmallVec<[Coordinate; 4]>;

/// The extent of a `rows x cols` grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridDimensions {
    rows: usize,
    cols: usize,
}

impl GridDimensions {
    #[inline(always)]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline(always)]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, `rows * cols`.
    #[inline(always)]
    pub const fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of cells, or `None` if `rows * cols` overflows `usize`.
    #[inline(always)]
    pub const fn checked_num_cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Returns `true` if the grid has no cells at all.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline(always)]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.rows && coordinate.col < self.cols
    }

    /// Converts a signed `(row, col)` pair into a coordinate of this grid.
    ///
    /// Returns `None` if either component is negative or the cell lies
    /// outside the grid.
    ///
    /// ```rust
    /// # use hangar_core::math::coordinate::{Coordinate, GridDimensions};
    /// let dims = GridDimensions::new(2, 3);
    /// assert_eq!(dims.checked_coordinate(1, 2), Some(Coordinate::new(1, 2)));
    /// assert_eq!(dims.checked_coordinate(-1, 0), None);
    /// assert_eq!(dims.checked_coordinate(2, 0), None);
    /// ```
    #[inline]
    pub fn checked_coordinate(&self, row: i64, col: i64) -> Option<Coordinate> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let coordinate = Coordinate::new(row, col);
        self.contains(coordinate).then_some(coordinate)
    }

    /// Row-major offset of `coordinate`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `coordinate` lies outside the grid.
    #[inline(always)]
    pub fn index_of(&self, coordinate: Coordinate) -> usize {
        debug_assert!(
            self.contains(coordinate),
            "called `GridDimensions::index_of` with coordinate out of bounds: the grid is {}x{} but the coordinate is {}",
            self.rows,
            self.cols,
            coordinate
        );
        coordinate.row * self.cols + coordinate.col
    }

    /// Inverse of `index_of`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index >= num_cells()`.
    #[inline(always)]
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        debug_assert!(
            index < self.num_cells(),
            "called `GridDimensions::coordinate_of` with index out of bounds: the len is {} but the index is {}",
            self.num_cells(),
            index
        );
        Coordinate::new(index / self.cols, index % self.cols)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Coordinate::new(r, c)))
    }

    /// The in-bounds orthogonal neighbours of `coordinate`, in row-major
    /// order (up, left, right, down).
    pub fn orthogonal_neighbors(&self, coordinate: Coordinate) -> Neighborhood {
        let mut out = Neighborhood::new();
        let (r, c) = (coordinate.row, coordinate.col);

        if r > 0 {
            out.push(Coordinate::new(r - 1, c));
        }
        if c > 0 {
            out.push(Coordinate::new(r, c - 1));
        }
        if c + 1 < self.cols {
            out.push(Coordinate::new(r, c + 1));
        }
        if r + 1 < self.rows {
            out.push(Coordinate::new(r + 1, c));
        }

        out
    }

    /// Returns `true` if the two cells share an edge.
    #[inline]
    pub fn are_adjacent(a: Coordinate, b: Coordinate) -> bool {
        a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
    }
}

impl std::fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
