use std::collections::VecDeque;

use crate::error::MedianError;
use crate::tracker::MedianTracker;

/// A FIFO of observations with a live median.
///
/// The tracker always holds exactly the multiset of values currently in the
/// queue: every mutation applies to both in the same operation. The queue
/// enforces no size cap; the caller pre-fills the window with `enqueue` and
/// slides it with `replace`.
#[derive(Debug, Default, Clone)]
pub struct MedianWindow<T: Ord + Clone> {
    fifo: VecDeque<T>,
    tracker: MedianTracker<T>,
}

impl<T: Ord + Clone> MedianWindow<T> {
    pub fn new() -> Self {
        Self {
            fifo: VecDeque::new(),
            tracker: MedianTracker::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    /// The window contents in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.fifo.iter()
    }

    /// Append a value to the back of the window.
    pub fn enqueue(&mut self, value: T) -> Result<(), MedianError> {
        self.tracker.insert(value.clone())?;
        self.fifo.push_back(value);
        Ok(())
    }

    /// Remove and return the oldest value.
    pub fn dequeue(&mut self) -> Result<T, MedianError> {
        let front = self.fifo.front().ok_or(MedianError::EmptyStructure)?.clone();
        self.tracker.remove(front)?;
        self.fifo.pop_front().ok_or(MedianError::EmptyStructure)
    }

    pub fn front(&self) -> Result<&T, MedianError> {
        self.fifo.front().ok_or(MedianError::EmptyStructure)
    }

    pub fn back(&self) -> Result<&T, MedianError> {
        self.fifo.back().ok_or(MedianError::EmptyStructure)
    }

    pub fn median(&mut self) -> Result<T, MedianError> {
        self.tracker.median()
    }

    /// Slide the window by one: drop the oldest value and append `value`.
    ///
    /// The tracker is handed the exact value leaving the physical front, so
    /// the two sides of the structure cannot drift apart.
    pub fn replace(&mut self, value: T) -> Result<(), MedianError> {
        let old = self.fifo.pop_front().ok_or(MedianError::EmptyStructure)?;
        self.fifo.push_back(value.clone());
        self.tracker.replace(old, value)
    }
}
