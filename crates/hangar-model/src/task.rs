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

//! Remaining maintenance work per aircraft and slot.
//!
//! `TaskState(a, t)` is the work aircraft `a` still has pending when slot `t`
//! begins. It is never a search variable: `TaskState(a, 0)` comes from the
//! fleet and every later state follows from the previous state and the kind
//! of location the aircraft occupied, via [`TaskState::consume`].
//!
//! Type-2 work strictly precedes type-1 work. While type-2 units remain the
//! aircraft must sit in a specialist bay and only type-2 work progresses.

use crate::grid::LocationKind;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TaskState {
    type1: u32,
    type2: u32,
}

impl TaskState {
    #[inline]
    pub const fn new(type1: u32, type2: u32) -> Self {
        Self { type1, type2 }
    }

    /// Type-1 units remaining.
    #[inline]
    pub const fn type1(&self) -> u32 {
        self.type1
    }

    /// Type-2 units remaining.
    #[inline]
    pub const fn type2(&self) -> u32 {
        self.type2
    }

    /// Returns `true` once both counters reached zero.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.type1 == 0 && self.type2 == 0
    }

    /// The state after spending one slot at a location of `kind`.
    ///
    /// A specialist bay completes one type-2 unit while any remain. Otherwise
    /// any bay completes one type-1 unit while any remain. Parking (and
    /// every other combination) leaves the state unchanged.
    ///
    /// ```rust
    /// use hangar_model::{grid::LocationKind, task::TaskState};
    ///
    /// let s = TaskState::new(1, 1);
    /// assert_eq!(s.consume(LocationKind::SpecialistBay), TaskState::new(1, 0));
    /// assert_eq!(s.consume(LocationKind::StandardBay), TaskState::new(1, 1));
    /// assert_eq!(TaskState::new(1, 0).consume(LocationKind::StandardBay), TaskState::new(0, 0));
    /// ```
    #[inline]
    pub const fn consume(self, kind: LocationKind) -> Self {
        match kind {
            LocationKind::SpecialistBay if self.type2 > 0 => Self::new(self.type1, self.type2 - 1),
            LocationKind::StandardBay | LocationKind::SpecialistBay
                if self.type2 == 0 && self.type1 > 0 =>
            {
                Self::new(self.type1 - 1, self.type2)
            }
            _ => self,
        }
    }

    /// Whether an aircraft in this state may occupy a location of `kind`.
    ///
    /// Pending type-2 work needs a specialist bay. Pending type-1 work needs
    /// any bay. An aircraft without pending work parks.
    #[inline]
    pub const fn accepts(&self, kind: LocationKind) -> bool {
        if self.type2 > 0 {
            matches!(kind, LocationKind::SpecialistBay)
        } else if self.type1 > 0 {
            kind.is_bay()
        } else {
            matches!(kind, LocationKind::Parking)
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TaskState(type1: {}, type2: {})", self.type1, self.type2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [LocationKind; 4] = [
        LocationKind::StandardBay,
        LocationKind::SpecialistBay,
        LocationKind::Parking,
        LocationKind::Unusable,
    ];

    #[test]
    fn test_type2_work_only_progresses_in_specialist_bays() {
        let s = TaskState::new(2, 2);
        assert_eq!(s.consume(LocationKind::SpecialistBay), TaskState::new(2, 1));
        assert_eq!(s.consume(LocationKind::StandardBay), s);
        assert_eq!(s.consume(LocationKind::Parking), s);
    }

    #[test]
    fn test_type1_work_progresses_in_any_bay_once_type2_is_done() {
        let s = TaskState::new(2, 0);
        assert_eq!(s.consume(LocationKind::StandardBay), TaskState::new(1, 0));
        assert_eq!(s.consume(LocationKind::SpecialistBay), TaskState::new(1, 0));
        assert_eq!(s.consume(LocationKind::Parking), s);
    }

    #[test]
    fn test_complete_state_is_a_fixed_point() {
        let s = TaskState::default();
        assert!(s.is_complete());
        for kind in KINDS {
            assert_eq!(s.consume(kind), s);
        }
    }

    #[test]
    fn test_consume_never_increases_and_respects_ordering() {
        for t1 in 0..3 {
            for t2 in 0..3 {
                let s = TaskState::new(t1, t2);
                for kind in KINDS {
                    let n = s.consume(kind);
                    assert!(n.type1() <= s.type1());
                    assert!(n.type2() <= s.type2());
                    if n.type1() < s.type1() {
                        assert_eq!(s.type2(), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_accepts_matches_pending_work() {
        let needs_spc = TaskState::new(3, 1);
        assert!(needs_spc.accepts(LocationKind::SpecialistBay));
        assert!(!needs_spc.accepts(LocationKind::StandardBay));
        assert!(!needs_spc.accepts(LocationKind::Parking));

        let needs_bay = TaskState::new(1, 0);
        assert!(needs_bay.accepts(LocationKind::SpecialistBay));
        assert!(needs_bay.accepts(LocationKind::StandardBay));
        assert!(!needs_bay.accepts(LocationKind::Parking));

        let done = TaskState::new(0, 0);
        assert!(done.accepts(LocationKind::Parking));
        assert!(!done.accepts(LocationKind::StandardBay));
        assert!(!done.accepts(LocationKind::SpecialistBay));

        for s in [needs_spc, needs_bay, done] {
            assert!(!s.accepts(LocationKind::Unusable));
        }
    }
}
