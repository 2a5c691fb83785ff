use std::collections::{BTreeMap, BinaryHeap};

use crate::error::MedianError;

/// A binary heap with lazy deletion.
///
/// Removing an arbitrary value from a binary heap costs O(n), so removals are
/// only recorded here: each call to [`LazyHeap::mark_removed`] bumps a
/// value-keyed pending-deletion count, and the physical pop is deferred until
/// the value surfaces at the top. Duplicate values share one counter.
///
/// The heap is max-ordered; instantiate with `Reverse<T>` for min ordering.
#[derive(Debug, Default, Clone)]
pub struct LazyHeap<T: Ord + Clone> {
    heap: BinaryHeap<T>,
    pending_deletes: BTreeMap<T, usize>,
    // Total multiplicity of outstanding logical removals not yet purged.
    pending_delete_count: usize,
}

impl<T: Ord + Clone> LazyHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending_deletes: BTreeMap::new(),
            pending_delete_count: 0,
        }
    }

    /// Add a value to the heap.
    ///
    /// If the value currently has a pending deletion, the insert cancels one
    /// outstanding removal instead of pushing a duplicate. This keeps the
    /// physical size bounded when the same value cycles through the window.
    pub fn insert(&mut self, value: T) {
        if let Some(&count) = self.pending_deletes.get(&value) {
            if count > 1 {
                self.pending_deletes.insert(value, count - 1);
            } else {
                self.pending_deletes.remove(&value);
            }
            self.pending_delete_count -= 1;
        } else {
            self.heap.push(value);
        }
    }

    /// Record one logical removal of `value` without touching the heap.
    ///
    /// Always succeeds, even when no physical entry for `value` exists yet;
    /// the reconciliation happens when the value reaches the top.
    pub fn mark_removed(&mut self, value: T) {
        *self.pending_deletes.entry(value).or_insert(0) += 1;
        self.pending_delete_count += 1;
    }

    /// Peek at the smallest/largest live value.
    pub fn top(&mut self) -> Result<&T, MedianError> {
        self.purge_top();
        self.heap.peek().ok_or(MedianError::EmptyStructure)
    }

    /// Remove and return the smallest/largest live value.
    pub fn pop_top(&mut self) -> Result<T, MedianError> {
        self.purge_top();
        self.heap.pop().ok_or(MedianError::EmptyStructure)
    }

    /// The number of live values: physical size minus pending deletions.
    pub fn logical_size(&self) -> usize {
        self.heap.len().saturating_sub(self.pending_delete_count)
    }

    pub fn is_empty(&self) -> bool {
        self.logical_size() == 0
    }

    // Pop physically-dead values until the top is live (or the heap is empty).
    // Must run before any inspection of the top.
    fn purge_top(&mut self) {
        while let Some(top) = self.heap.peek() {
            let Some(&count) = self.pending_deletes.get(top) else {
                break;
            };
            let key = top.clone();
            if count > 1 {
                self.pending_deletes.insert(key, count - 1);
            } else {
                self.pending_deletes.remove(&key);
            }
            self.pending_delete_count -= 1;
            self.heap.pop();
        }
    }
}
