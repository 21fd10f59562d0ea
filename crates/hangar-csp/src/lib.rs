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

//! # Hangar CSP
//!
//! **Constraint search for aircraft maintenance scheduling.**
//!
//! The crate enumerates schedules of a `hangar_model::model::Model`: one
//! location per aircraft and time slot such that every rule holds.
//!
//! ## Architecture
//!
//! * **`constraints`**: Pure predicates over one slot's occupancy (capacity,
//!   clearance, jumbo separation) and over a task state (compatibility).
//! * **`state`**, **`domain`**, **`trail`**, **`stack`**: The mutable search
//!   state, per-variable domains, the undo log and the decision stack.
//! * **`branching`**: Decision builders (chronological, most constrained).
//! * **`monitor`**: Observers and stop conditions plugged into the engine.
//! * **`solver`**: The engine (`Solutions`, a lazy iterator), the `solve`
//!   entry point and the configured `BacktrackingSolver`.
//! * **`validation`**: From-scratch checking of finished schedules.
//!
//! ## Example
//!
//! ```rust
//! use hangar_csp::solver::solve;
//! use hangar_model::{fleet::AircraftSpec, model::build_model};
//!
//! let model = build_model(1, 1, &[], &[(0, 0)], &[], &[AircraftSpec::standard(1, 0, 1)], 1).unwrap();
//! let schedules: Vec<_> = solve(&model, 10).collect();
//! assert_eq!(schedules.len(), 1);
//! ```

pub mod branching;
pub mod config;
pub mod constraints;
pub mod domain;
pub mod monitor;
pub mod result;
pub mod solver;
pub mod stack;
pub mod state;
pub mod stats;
pub mod trail;
pub mod validation;
