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

//! Solution file writer.
//!
//! ```text
//! N. Sol: 2
//! Solution 1:
//! 1-JMB-T-2-2: SPC(0,3), SPC(0,3), STD(1,1), STD(1,1)
//! ...
//! ```
//!
//! One line per aircraft in id order, labelled as in the instance file,
//! with one location per slot.

use hangar_model::{index::AircraftIndex, model::Model, solution::Solution};
use std::io::Write;

pub(crate) fn write_solutions<W: Write>(
    writer: &mut W,
    model: &Model,
    solutions: &[Solution],
) -> std::io::Result<()> {
    writeln!(writer, "N. Sol: {}", solutions.len())?;
    for (number, solution) in solutions.iter().enumerate() {
        writeln!(writer, "Solution {}:", number + 1)?;
        for aircraft in AircraftIndex::range(model.num_aircraft()) {
            let itinerary: Vec<String> = solution
                .itinerary(aircraft)
                .map(|location| location.to_string())
                .collect();
            writeln!(writer, "{}: {}", model.aircraft(aircraft), itinerary.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_csp::solver::solve;
    use hangar_model::{fleet::AircraftSpec, model::build_model};

    #[test]
    fn test_writes_header_and_itineraries() {
        let model = build_model(
            1,
            2,
            &[],
            &[(0, 0)],
            &[(0, 1)],
            &[AircraftSpec::new(
                4,
                hangar_model::fleet::AircraftCategory::Jumbo,
                true,
                0,
                1,
            )],
            2,
        )
        .unwrap();
        let solutions: Vec<Solution> = solve(&model, 1).collect();

        let mut buffer = Vec::new();
        write_solutions(&mut buffer, &model, &solutions).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "N. Sol: 1\nSolution 1:\n4-JMB-T-0-1: SPC(0,0), PRK(0,1)\n"
        );
    }

    #[test]
    fn test_aircraft_are_listed_by_id() {
        let model = build_model(
            1,
            3,
            &[],
            &[],
            &[(0, 0), (0, 1), (0, 2)],
            &[AircraftSpec::standard(9, 0, 0), AircraftSpec::standard(2, 0, 0)],
            1,
        )
        .unwrap();
        let solutions: Vec<Solution> = solve(&model, 1).collect();

        let mut buffer = Vec::new();
        write_solutions(&mut buffer, &model, &solutions).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "2-STD-F-0-0: PRK(0,0)");
        assert_eq!(lines[3], "9-STD-F-0-0: PRK(0,0)");
    }

    #[test]
    fn test_no_solutions() {
        let model = build_model(1, 1, &[], &[], &[(0, 0)], &[], 1).unwrap();
        let mut buffer = Vec::new();
        write_solutions(&mut buffer, &model, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "N. Sol: 0\n");
    }
}
