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

//! Console rendering of a schedule, one grid per slot.
//!
//! Every cell shows its kind code followed by the ids of the aircraft it
//! holds, e.g. `SPC[1]` or `PRK[2,5]`; unusable cells show `---`.

use hangar_core::math::coordinate::Coordinate;
use hangar_model::{index::AircraftIndex, model::Model, solution::Solution};

fn cell_text(model: &Model, solution: &Solution, slot: usize, coordinate: Coordinate) -> String {
    let kind = model.grid().kind_at(coordinate);
    let occupants: Vec<String> = AircraftIndex::range(model.num_aircraft())
        .filter(|&aircraft| solution.location(aircraft, slot).coordinate() == coordinate)
        .map(|aircraft| model.aircraft(aircraft).id().to_string())
        .collect();

    if occupants.is_empty() {
        kind.code().to_string()
    } else {
        format!("{}[{}]", kind.code(), occupants.join(","))
    }
}

/// The grid of `slot`, one line per row with cells padded to equal width.
pub(crate) fn render_slot(model: &Model, solution: &Solution, slot: usize) -> String {
    let grid = model.grid();
    let cells: Vec<Vec<String>> = (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| cell_text(model, solution, slot, Coordinate::new(row, col)))
                .collect()
        })
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for row in &cells {
        let line: Vec<String> = row.iter().map(|cell| format!("{:<width$}", cell)).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

pub(crate) fn render_solution(model: &Model, solution: &Solution) -> String {
    let mut out = String::new();
    for slot in 0..solution.horizon() {
        out.push_str(&format!("Slot {}:\n", slot));
        out.push_str(&render_slot(model, solution, slot));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_csp::solver::solve;
    use hangar_model::{fleet::AircraftSpec, model::build_model};

    #[test]
    fn test_renders_occupants_per_cell() {
        let model = build_model(
            2,
            2,
            &[],
            &[(0, 0)],
            &[(0, 1), (1, 1)],
            &[AircraftSpec::standard(3, 0, 1), AircraftSpec::standard(8, 0, 0)],
            1,
        )
        .unwrap();
        let solution = solve(&model, 1).next().unwrap();

        assert_eq!(
            render_slot(&model, &solution, 0),
            "SPC[3] PRK[8]\n---    PRK\n"
        );
    }

    #[test]
    fn test_renders_every_slot() {
        let model = build_model(1, 1, &[], &[], &[(0, 0)], &[AircraftSpec::standard(1, 0, 0)], 2)
            .unwrap();
        let solution = solve(&model, 1).next().unwrap();
        assert_eq!(
            render_solution(&model, &solution),
            "Slot 0:\nPRK[1]\nSlot 1:\nPRK[1]\n"
        );
    }

    #[test]
    fn test_zero_horizon_renders_nothing() {
        let model = build_model(1, 2, &[], &[], &[(0, 0)], &[AircraftSpec::standard(1, 0, 0)], 0)
            .unwrap();
        let solution = solve(&model, 1).next().unwrap();
        assert_eq!(render_solution(&model, &solution), "");
    }
}
