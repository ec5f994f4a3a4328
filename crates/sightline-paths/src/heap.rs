//! Array-backed binary min-heap.
//!
//! Unlike [`std::collections::BinaryHeap`] this pops the *smallest* item
//! first and reports underflow as [`PathError::EmptyQueue`]. There is no
//! decrease-key: callers re-insert improved items and discard stale copies
//! when they surface.

use crate::error::PathError;

/// A binary min-heap ordered by `T`'s [`Ord`] implementation.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty heap with room for `cap` items.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
        }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The smallest item, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Remove every item, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Insert `item`. O(log n).
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest item. O(log n).
    pub fn extract_min(&mut self) -> Result<T, PathError> {
        if self.items.is_empty() {
            return Err(PathError::EmptyQueue);
        }
        let item = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(item)
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.items[child] >= self.items[parent] {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.items[right] < self.items[left] {
                smallest = right;
            }
            if self.items[parent] <= self.items[smallest] {
                break;
            }
            self.items.swap(parent, smallest);
            parent = smallest;
        }
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
