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

use crate::branching::decision::Decision;

/// A frame-structured LIFO stack of pending decisions.
///
/// All enqueued decisions live in one linear buffer; `frames` marks where
/// each decision level begins. Popping a frame truncates the buffer back to
/// the recorded start.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    entries: Vec<Decision>,
    /// `frames[i]` is the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl SearchStack {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Sized for `num_variables` levels of at most `num_locations` values each.
    #[inline]
    pub fn preallocated(num_locations: usize, num_variables: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_variables.saturating_mul(num_locations)),
            frames: Vec::with_capacity(num_variables.saturating_add(1)),
        }
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Drops the newest frame together with its untried decisions.
    #[inline]
    pub fn pop_frame(&mut self) -> Option<()> {
        let start = self.frames.pop()?;
        self.entries.truncate(start);
        Some(())
    }

    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Decision>,
    {
        self.entries.extend(iter);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Decision> {
        self.entries.pop()
    }

    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    /// Returns `true` if the newest frame has no decision left to try.
    #[inline]
    pub fn is_current_level_empty(&self) -> bool {
        match self.frames.last() {
            Some(&start) => self.entries.len() == start,
            None => true,
        }
    }
}

impl std::fmt::Display for SearchStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStack(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_model::index::{LocationIndex, VariableIndex};

    fn d(v: usize, l: usize) -> Decision {
        Decision::new(VariableIndex::new(v), LocationIndex::new(l))
    }

    #[test]
    fn test_new_stack_is_empty() {
        let s = SearchStack::new();
        assert!(s.is_empty());
        assert!(s.is_current_level_empty());
        assert_eq!(s.to_string(), "SearchStack(entries: 0, frames: 0)");

        let p = SearchStack::preallocated(4, 6);
        assert!(p.is_empty());
        assert_eq!(p.num_entries(), 0);
    }

    #[test]
    fn test_frames_isolate_levels() {
        let mut s = SearchStack::new();
        s.push_frame();
        s.extend([d(0, 2), d(0, 1), d(0, 0)]);
        assert_eq!(s.num_entries(), 3);

        assert_eq!(s.pop(), Some(d(0, 0)));

        s.push_frame();
        assert!(s.is_current_level_empty());
        s.extend([d(1, 1)]);
        assert_eq!(s.depth(), 2);
        assert_eq!(s.num_entries(), 3);

        assert_eq!(s.pop_frame(), Some(()));
        assert_eq!(s.num_entries(), 2);
        assert!(!s.is_current_level_empty());
        assert_eq!(s.pop(), Some(d(0, 1)));

        assert_eq!(s.pop_frame(), Some(()));
        assert_eq!(s.pop_frame(), None);
        assert_eq!(s.num_entries(), 0);
    }

    #[test]
    fn test_reset_clears_every_frame() {
        let mut s = SearchStack::preallocated(1, 1);
        s.push_frame();
        s.extend([d(0, 0)]);
        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.num_entries(), 0);
        assert!(s.is_current_level_empty());
        assert_eq!(s.pop_frame(), None);
    }
}
