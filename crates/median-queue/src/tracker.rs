use std::cmp::Reverse;

use crate::error::MedianError;
use crate::lazyheap::LazyHeap;

/// Rebalancing moves elements across heaps only once the logical sizes
/// differ by at least this much, and stops as soon as they differ by less.
/// The structure therefore tolerates a skew of up to two indefinitely.
pub const DEFAULT_REBALANCE_THRESHOLD: usize = 3;

/// Tracks the median of a dynamic multiset with two lazy-deletion heaps.
///
/// `low` is the min-ordered gate heap: it receives the first element and
/// every value at least as large as its top, so it accumulates the upper
/// half of the multiset. `high` is max-ordered and receives the values
/// below the gate. The median is the top of whichever heap holds more live
/// values, with ties going to `high`.
#[derive(Debug, Clone)]
pub struct MedianTracker<T: Ord + Clone> {
    low: LazyHeap<Reverse<T>>,
    high: LazyHeap<T>,
    rebalance_threshold: usize,
}

impl<T: Ord + Clone> Default for MedianTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> MedianTracker<T> {
    pub fn new() -> Self {
        Self::with_rebalance_threshold(DEFAULT_REBALANCE_THRESHOLD)
    }

    pub fn with_rebalance_threshold(threshold: usize) -> Self {
        Self {
            low: LazyHeap::new(),
            high: LazyHeap::new(),
            rebalance_threshold: threshold,
        }
    }

    pub fn insert(&mut self, value: T) -> Result<(), MedianError> {
        if self.low.is_empty() && self.high.is_empty() {
            self.low.insert(Reverse(value));
            return Ok(());
        }
        let gate = self.low.top()?.0.clone();
        if value < gate {
            self.high.insert(value);
        } else {
            self.low.insert(Reverse(value));
        }
        Ok(())
    }

    /// Record the logical removal of one instance of `value`.
    ///
    /// The heap is selected by the same gate comparison as `insert`, so a
    /// value removed after being inserted is marked in the heap that holds
    /// it.
    pub fn remove(&mut self, value: T) -> Result<(), MedianError> {
        let gate = self.low.top()?.0.clone();
        if value < gate {
            self.high.mark_removed(value);
        } else {
            self.low.mark_removed(Reverse(value));
        }
        Ok(())
    }

    /// Move tops across heaps until the logical sizes differ by less than
    /// the threshold. Each move shrinks the imbalance by two.
    pub fn rebalance(&mut self) -> Result<(), MedianError> {
        while self
            .low
            .logical_size()
            .abs_diff(self.high.logical_size())
            >= self.rebalance_threshold
        {
            let (low_size, high_size) = self.logical_sizes();
            tracing::trace!(low_size, high_size, "rebalancing median heaps");
            if low_size > high_size {
                let Reverse(moved) = self.low.pop_top()?;
                self.high.insert(moved);
            } else {
                let moved = self.high.pop_top()?;
                self.low.insert(Reverse(moved));
            }
        }
        Ok(())
    }

    /// The current median: the top of the larger heap after rebalancing,
    /// ties to `high`.
    pub fn median(&mut self) -> Result<T, MedianError> {
        self.rebalance()?;
        if self.low.logical_size() > self.high.logical_size() {
            Ok(self.low.top()?.0.clone())
        } else {
            Ok(self.high.top()?.clone())
        }
    }

    /// Remove one instance of `old` and insert `new`, placing `new` against
    /// the median as it stands after the removal.
    pub fn replace(&mut self, old: T, new: T) -> Result<(), MedianError> {
        self.remove(old)?;
        let median = self.median()?;
        if new > median {
            self.low.insert(Reverse(new));
        } else {
            self.high.insert(new);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.low.logical_size() + self.high.logical_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live sizes of the `(low, high)` heaps.
    pub fn logical_sizes(&self) -> (usize, usize) {
        (self.low.logical_size(), self.high.logical_size())
    }
}
