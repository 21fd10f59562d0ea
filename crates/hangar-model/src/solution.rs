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

//! Complete schedules.
//!
//! A `Solution` answers "where is aircraft `a` during slot `t`" for every
//! aircraft and slot of a model. Data is stored slot-major in a flat vector,
//! matching the variable layout of `Model`, and each entry keeps the full
//! `Location` (coordinate and kind) so that a solution can be rendered or
//! written without the model at hand.

use crate::{
    fleet::AircraftId,
    grid::Location,
    index::AircraftIndex,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    /// Aircraft ids in `AircraftIndex` order.
    aircraft_ids: Vec<AircraftId>,
    horizon: usize,
    /// `locations[t * num_aircraft + a]` is the location of aircraft `a` at slot `t`.
    locations: Vec<Location>,
}

impl Solution {
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `locations.len() != aircraft_ids.len() * horizon`.
    pub fn new(aircraft_ids: Vec<AircraftId>, horizon: usize, locations: Vec<Location>) -> Self {
        assert_eq!(
            locations.len(),
            aircraft_ids.len() * horizon,
            "called Solution::new with inconsistent lengths: locations.len() = {}, aircraft_ids.len() * horizon = {}",
            locations.len(),
            aircraft_ids.len() * horizon
        );

        Self {
            aircraft_ids,
            horizon,
            locations,
        }
    }

    /// The trivial schedule of a model without variables.
    #[inline]
    pub fn empty(aircraft_ids: Vec<AircraftId>, horizon: usize) -> Self {
        Self::new(aircraft_ids, horizon, Vec::new())
    }

    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.aircraft_ids.len()
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns `true` if the schedule assigns nothing (empty fleet or horizon).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[inline]
    pub fn aircraft_ids(&self) -> &[AircraftId] {
        &self.aircraft_ids
    }

    /// Location of `aircraft` during `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` or `slot` is out of range.
    #[inline]
    pub fn location(&self, aircraft: AircraftIndex, slot: usize) -> Location {
        debug_assert!(
            aircraft.get() < self.num_aircraft(),
            "called `Solution::location` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            aircraft.get()
        );
        debug_assert!(
            slot < self.horizon,
            "called `Solution::location` with slot out of bounds: the len is {} but the index is {}",
            self.horizon,
            slot
        );
        self.locations[slot * self.num_aircraft() + aircraft.get()]
    }

    /// Location of the aircraft with the given id during `slot`.
    #[inline]
    pub fn location_of(&self, id: AircraftId, slot: usize) -> Option<Location> {
        if slot >= self.horizon {
            return None;
        }
        let index = self.aircraft_ids.iter().position(|&a| a == id)?;
        Some(self.location(AircraftIndex::new(index), slot))
    }

    /// All placements of one slot, in `AircraftIndex` order.
    #[inline]
    pub fn slot(&self, slot: usize) -> &[Location] {
        let n = self.num_aircraft();
        &self.locations[slot * n..(slot + 1) * n]
    }

    /// The locations visited by `aircraft`, slot by slot.
    #[inline]
    pub fn itinerary(&self, aircraft: AircraftIndex) -> impl Iterator<Item = Location> + '_ {
        (0..self.horizon).map(move |t| self.location(aircraft, t))
    }

    /// Flat slot-major view of all placements.
    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Schedule Summary")?;
        writeln!(f, "   Aircraft: {}, Slots: {}", self.num_aircraft(), self.horizon)?;
        writeln!(f)?;

        if self.is_empty() {
            writeln!(f, "   (No placements)")?;
            return Ok(());
        }

        write!(f, "   {:<10}", "Aircraft")?;
        for t in 0..self.horizon {
            write!(f, " | {:<10}", format!("t={}", t))?;
        }
        writeln!(f)?;

        write!(f, "   {:-<10}", "")?;
        for _ in 0..self.horizon {
            write!(f, "-+-{:-<10}", "")?;
        }
        writeln!(f)?;

        for (a, id) in self.aircraft_ids.iter().enumerate() {
            write!(f, "   {:<10}", id)?;
            for loc in self.itinerary(AircraftIndex::new(a)) {
                write!(f, " | {:<10}", loc.to_string())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LocationKind;
    use hangar_core::math::coordinate::Coordinate;

    fn loc(r: usize, c: usize, kind: LocationKind) -> Location {
        Location::new(Coordinate::new(r, c), kind)
    }

    fn sample() -> Solution {
        // Two aircraft (ids 4 and 9), two slots.
        Solution::new(
            vec![4, 9],
            2,
            vec![
                loc(0, 0, LocationKind::SpecialistBay),
                loc(0, 1, LocationKind::Parking),
                loc(1, 0, LocationKind::StandardBay),
                loc(0, 1, LocationKind::Parking),
            ],
        )
    }

    #[test]
    fn test_accessors_follow_slot_major_layout() {
        let s = sample();
        assert_eq!(s.num_aircraft(), 2);
        assert_eq!(s.horizon(), 2);
        assert_eq!(s.location(AircraftIndex::new(0), 1), loc(1, 0, LocationKind::StandardBay));
        assert_eq!(s.location_of(9, 0), Some(loc(0, 1, LocationKind::Parking)));
        assert_eq!(s.location_of(5, 0), None);
        assert_eq!(s.location_of(4, 2), None);
        assert_eq!(s.slot(1).len(), 2);

        let path: Vec<Location> = s.itinerary(AircraftIndex::new(0)).collect();
        assert_eq!(
            path,
            vec![loc(0, 0, LocationKind::SpecialistBay), loc(1, 0, LocationKind::StandardBay)]
        );
    }

    #[test]
    #[should_panic(expected = "called Solution::new with inconsistent lengths")]
    fn test_new_panics_on_length_mismatch() {
        let _ = Solution::new(vec![1, 2], 1, vec![loc(0, 0, LocationKind::Parking)]);
    }

    #[test]
    fn test_empty_solution() {
        let s = Solution::empty(vec![], 3);
        assert!(s.is_empty());
        assert!(s.to_string().contains("(No placements)"));

        let s = Solution::empty(vec![1, 2], 0);
        assert!(s.is_empty());
        assert_eq!(s.itinerary(AircraftIndex::new(1)).count(), 0);
    }

    #[test]
    fn test_display_formatting_example() {
        let displayed = format!("{}", sample());

        let mut expected = String::new();
        expected.push_str("Schedule Summary\n");
        expected.push_str("   Aircraft: 2, Slots: 2\n");
        expected.push('\n');
        expected.push_str("   Aircraft   | t=0        | t=1       \n");
        expected.push_str("   -----------+------------+-----------\n");
        expected.push_str("   4          | SPC(0,0)   | STD(1,0)  \n");
        expected.push_str("   9          | PRK(0,1)   | PRK(0,1)  \n");

        assert_eq!(displayed, expected);
    }
}
