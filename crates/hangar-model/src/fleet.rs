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

//! Aircraft awaiting maintenance.
//!
//! The raw, unvalidated description of an aircraft is an `AircraftSpec`; its
//! task counters are signed so that malformed input can be represented and
//! rejected. `Fleet::new` validates a list of specs and stores the accepted
//! `Aircraft` sorted by id, which fixes the `AircraftIndex` numbering used by
//! the search (variables are ordered by slot, then aircraft id).

use crate::index::AircraftIndex;
use rustc_hash::FxHashSet;

/// Stable external identifier of an aircraft.
pub type AircraftId = u64;

/// Size class of an aircraft.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum AircraftCategory {
    #[default]
    Standard,
    Jumbo,
}

impl AircraftCategory {
    /// The three-letter code used by the instance and solution file formats.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AircraftCategory::Standard => "STD",
            AircraftCategory::Jumbo => "JMB",
        }
    }

    #[inline]
    pub const fn is_jumbo(&self) -> bool {
        matches!(self, AircraftCategory::Jumbo)
    }
}

impl std::fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AircraftCategory::Standard => write!(f, "Standard"),
            AircraftCategory::Jumbo => write!(f, "Jumbo"),
        }
    }
}

/// Unvalidated aircraft description as it comes from the input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AircraftSpec {
    pub id: AircraftId,
    pub category: AircraftCategory,
    /// Carried through to the output unchanged; no rule depends on it.
    pub restricted: bool,
    pub type1_tasks: i64,
    pub type2_tasks: i64,
}

impl AircraftSpec {
    #[inline]
    pub fn new(
        id: AircraftId,
        category: AircraftCategory,
        restricted: bool,
        type1_tasks: i64,
        type2_tasks: i64,
    ) -> Self {
        Self {
            id,
            category,
            restricted,
            type1_tasks,
            type2_tasks,
        }
    }

    /// A standard, unrestricted aircraft.
    #[inline]
    pub fn standard(id: AircraftId, type1_tasks: i64, type2_tasks: i64) -> Self {
        Self::new(id, AircraftCategory::Standard, false, type1_tasks, type2_tasks)
    }

    /// A jumbo, unrestricted aircraft.
    #[inline]
    pub fn jumbo(id: AircraftId, type1_tasks: i64, type2_tasks: i64) -> Self {
        Self::new(id, AircraftCategory::Jumbo, false, type1_tasks, type2_tasks)
    }
}

/// A validated aircraft.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Aircraft {
    id: AircraftId,
    category: AircraftCategory,
    restricted: bool,
    type1_tasks: u32,
    type2_tasks: u32,
}

impl Aircraft {
    #[inline]
    pub fn id(&self) -> AircraftId {
        self.id
    }

    #[inline]
    pub fn category(&self) -> AircraftCategory {
        self.category
    }

    #[inline]
    pub fn is_jumbo(&self) -> bool {
        self.category.is_jumbo()
    }

    #[inline]
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Type-1 work units pending before the first slot.
    #[inline]
    pub fn type1_tasks(&self) -> u32 {
        self.type1_tasks
    }

    /// Type-2 work units pending before the first slot.
    #[inline]
    pub fn type2_tasks(&self) -> u32 {
        self.type2_tasks
    }
}

impl std::fmt::Display for Aircraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.id,
            self.category.code(),
            if self.restricted { "T" } else { "F" },
            self.type1_tasks,
            self.type2_tasks
        )
    }
}

/// Malformed fleet description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FleetError {
    #[error("aircraft id {id} appears more than once")]
    DuplicateId { id: AircraftId },
    #[error("aircraft {id} has a negative task count (type-1: {type1}, type-2: {type2})")]
    NegativeTaskCount {
        id: AircraftId,
        type1: i64,
        type2: i64,
    },
    #[error("aircraft {id} has a task count that does not fit in 32 bits (type-1: {type1}, type-2: {type2})")]
    TaskCountOverflow {
        id: AircraftId,
        type1: i64,
        type2: i64,
    },
}

/// The validated set of aircraft, sorted by id.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Fleet {
    aircraft: Vec<Aircraft>,
}

impl Fleet {
    /// Validates `specs` and sorts the accepted aircraft by id.
    ///
    /// # Errors
    ///
    /// - `FleetError::DuplicateId` if two specs share an id.
    /// - `FleetError::NegativeTaskCount` if a counter is below zero.
    /// - `FleetError::TaskCountOverflow` if a counter exceeds `u32::MAX`.
    pub fn new(specs: &[AircraftSpec]) -> Result<Self, FleetError> {
        let mut seen = FxHashSet::default();
        let mut aircraft = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.id) {
                return Err(FleetError::DuplicateId { id: spec.id });
            }

            if spec.type1_tasks < 0 || spec.type2_tasks < 0 {
                return Err(FleetError::NegativeTaskCount {
                    id: spec.id,
                    type1: spec.type1_tasks,
                    type2: spec.type2_tasks,
                });
            }

            let (Ok(type1_tasks), Ok(type2_tasks)) = (
                u32::try_from(spec.type1_tasks),
                u32::try_from(spec.type2_tasks),
            ) else {
                return Err(FleetError::TaskCountOverflow {
                    id: spec.id,
                    type1: spec.type1_tasks,
                    type2: spec.type2_tasks,
                });
            };

            aircraft.push(Aircraft {
                id: spec.id,
                category: spec.category,
                restricted: spec.restricted,
                type1_tasks,
                type2_tasks,
            });
        }

        aircraft.sort_unstable_by_key(|a| a.id);
        Ok(Self { aircraft })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Returns the aircraft at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..len()`.
    #[inline]
    pub fn get(&self, index: AircraftIndex) -> &Aircraft {
        debug_assert!(
            index.get() < self.len(),
            "called `Fleet::get` with aircraft index out of bounds: the len is {} but the index is {}",
            self.len(),
            index.get()
        );
        &self.aircraft[index.get()]
    }

    /// Finds the index of the aircraft with the given id.
    #[inline]
    pub fn index_of(&self, id: AircraftId) -> Option<AircraftIndex> {
        self.aircraft
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(AircraftIndex::new)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Aircraft> {
        self.aircraft.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Aircraft] {
        &self.aircraft
    }

    #[inline]
    pub fn num_jumbos(&self) -> usize {
        self.aircraft.iter().filter(|a| a.is_jumbo()).count()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Aircraft;
    type IntoIter = std::slice::Iter<'a, Aircraft>;

    fn into_iter(self) -> Self::IntoIter {
        self.aircraft.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_is_sorted_by_id() {
        let fleet = Fleet::new(&[
            AircraftSpec::standard(7, 0, 0),
            AircraftSpec::jumbo(2, 1, 0),
            AircraftSpec::standard(4, 0, 3),
        ])
        .unwrap();

        let ids: Vec<AircraftId> = fleet.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![2, 4, 7]);
        assert_eq!(fleet.index_of(4), Some(AircraftIndex::new(1)));
        assert_eq!(fleet.index_of(5), None);
        assert!(fleet.get(AircraftIndex::new(0)).is_jumbo());
        assert_eq!(fleet.num_jumbos(), 1);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = Fleet::new(&[AircraftSpec::standard(1, 0, 0), AircraftSpec::jumbo(1, 0, 0)])
            .unwrap_err();
        assert_eq!(err, FleetError::DuplicateId { id: 1 });
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let err = Fleet::new(&[AircraftSpec::standard(3, -1, 0)]).unwrap_err();
        assert_eq!(
            err,
            FleetError::NegativeTaskCount {
                id: 3,
                type1: -1,
                type2: 0
            }
        );

        let err = Fleet::new(&[AircraftSpec::standard(3, 0, -2)]).unwrap_err();
        assert!(matches!(err, FleetError::NegativeTaskCount { type2: -2, .. }));
    }

    #[test]
    fn test_oversized_counts_are_rejected() {
        let err = Fleet::new(&[AircraftSpec::standard(1, i64::from(u32::MAX) + 1, 0)]).unwrap_err();
        assert!(matches!(err, FleetError::TaskCountOverflow { id: 1, .. }));
    }

    #[test]
    fn test_empty_fleet_is_valid() {
        let fleet = Fleet::new(&[]).unwrap();
        assert!(fleet.is_empty());
        assert_eq!(fleet.len(), 0);
    }

    #[test]
    fn test_restriction_flag_and_display() {
        let fleet = Fleet::new(&[AircraftSpec::new(1, AircraftCategory::Jumbo, true, 2, 2)]).unwrap();
        let a = fleet.get(AircraftIndex::new(0));
        assert!(a.is_restricted());
        assert_eq!(a.to_string(), "1-JMB-T-2-2");
    }
}
