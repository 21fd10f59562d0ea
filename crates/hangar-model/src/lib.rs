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

//! # Hangar Model
//!
//! **The domain model for aircraft maintenance scheduling.**
//!
//! This crate describes *what* has to be scheduled: a rectangular
//! maintenance surface made of bays and parking stands, a fleet of aircraft
//! with pending maintenance work, and a horizon of discrete time slots. It is
//! the data interchange layer between the instance files and the constraint
//! engine (`hangar_csp`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `AircraftIndex`, `LocationIndex` and `VariableIndex`.
//! * **`grid`**: `Grid`, `Location` and `LocationKind`, with orthogonal neighbourhoods.
//! * **`fleet`**: `Aircraft`, `AircraftCategory` and the id-sorted `Fleet`.
//! * **`task`**: `TaskState` and the deterministic work consumption rule.
//! * **`model`**: The immutable `Model`, `build_model` and the fluent `ModelBuilder`.
//! * **`solution`**: `Solution`, a complete `(aircraft, slot) -> Location` schedule.
//! * **`loading`**: The line-oriented instance file loader.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: Topology and fleet errors are reported by `build_model`,
//!     before any search starts. The solver never sees an invalid model.
//! 2.  **Canonical Order**: Aircraft are sorted by id and locations by
//!     `(row, col)`. Every index space, and therefore every search order, is
//!     deterministic.
//! 3.  **Flat Storage**: Per-slot data is laid out slot-major in flat vectors.

pub mod fleet;
pub mod grid;
pub mod index;
pub mod loading;
pub mod model;
pub mod solution;
pub mod task;
