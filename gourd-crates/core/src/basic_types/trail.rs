use std::iter::Rev;
use std::vec::Drain;

use crate::gourd_assert_simple;

/// An append-only log of undo records, partitioned into checkpoints.
///
/// Opening a checkpoint is O(1); restoring to an earlier checkpoint hands back the records made
/// since, newest first, so the caller can undo them in reverse order.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the position where the i-th checkpoint ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Implemented by hand so that `T` does not need to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: Default::default(),
            trail_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Drops every checkpoint above `new_checkpoint` and returns the records they contained in
    /// reverse order of insertion. Synchronising to the current checkpoint returns nothing.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        gourd_assert_simple!(new_checkpoint <= self.current_checkpoint);

        let new_trail_len = self
            .trail_delimiter
            .get(new_checkpoint)
            .copied()
            .unwrap_or(self.trail.len());

        self.current_checkpoint = new_checkpoint;
        self.trail_delimiter.truncate(new_checkpoint);
        self.trail.drain(new_trail_len..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.trail.len()
    }
}
