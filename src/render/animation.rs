//! Pending visual updates.
//!
//! Style changes to marks are not applied when they are requested; they wait
//! here until the caller settles the figure. Rasterizing only reflects
//! updates that were flushed.

use std::collections::VecDeque;

use super::marks::{Scatter, StyleUpdate};

/// Index of a mark within its figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub usize);

/// FIFO of style updates waiting to be applied.
#[derive(Debug, Default)]
pub struct AnimationQueue {
    pending: VecDeque<(MarkId, StyleUpdate)>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, mark: MarkId, update: StyleUpdate) {
        self.pending.push_back((mark, update));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply every pending update in order. Updates addressed to marks that
    /// no longer exist are dropped. Returns how many were applied.
    pub fn flush(&mut self, marks: &mut [Scatter]) -> usize {
        let mut applied = 0;
        while let Some((MarkId(i), update)) = self.pending.pop_front() {
            if let Some(mark) = marks.get_mut(i) {
                mark.apply(update);
                applied += 1;
            }
        }
        log::trace!("flushed {applied} pending mark update(s)");
        applied
    }
}
