use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::quince_assert_simple;

#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_decision_level: usize,
    /// At index i is the position where the i-th decision level ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// We explicitly implement the Default and not as a macro, because we want to avoid imposing Default
// on the generic type T.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_decision_level: Default::default(),
            trail_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn increase_decision_level(&mut self) {
        self.current_decision_level += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.current_decision_level
    }

    pub(crate) fn synchronise(&mut self, new_decision_level: usize) -> Rev<Drain<'_, T>> {
        quince_assert_simple!(new_decision_level < self.current_decision_level);

        let new_trail_len = self.trail_delimiter[new_decision_level];

        self.current_decision_level = new_decision_level;
        self.trail_delimiter.truncate(new_decision_level);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
