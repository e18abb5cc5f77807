//! Fixed-capacity binary min-heap keyed by weight.
//!
//! Layout is the usual implicit binary tree over a `Vec`: the parent of `i` is
//! `(i - 1) / 2`, its children are `2i + 1` and `2i + 2`.

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};

/// Anything that can be ordered in a [`MinHeap`].
pub trait Weighted {
    fn weight(&self) -> u64;
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}

/// Array-backed min-heap with a capacity fixed at creation.
///
/// Equal weights are left in whatever order the sift operations produce;
/// no secondary ordering is applied.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Weighted> MinHeap<T> {
    /// Allocate storage for up to `capacity` items.
    pub fn with_capacity(capacity: usize) -> DomainResult<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| DomainError::ResourceExhausted {
                what: "heap slots",
                requested: capacity,
            })?;
        Ok(Self { items, capacity })
    }

    /// Build a heap over an unordered sequence; capacity equals its length.
    pub fn build_from(items: Vec<T>) -> Self {
        let capacity = items.len();
        let mut heap = Self { items, capacity };
        if capacity > 1 {
            for idx in (0..=(capacity - 2) / 2).rev() {
                heap.min_heapify(idx);
            }
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_singleton(&self) -> bool {
        self.items.len() == 1
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Insert an item and sift it up.
    ///
    /// # Panics
    /// If the heap is already at capacity. The merge loop always extracts
    /// before inserting, so this only fires on misuse.
    pub fn insert(&mut self, item: T) {
        assert!(
            self.items.len() < self.capacity,
            "MinHeap::insert beyond capacity {}",
            self.capacity
        );
        let weight = item.weight();
        self.items.push(item);

        let mut idx = self.items.len() - 1;
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if weight >= self.items[parent].weight() {
                break;
            }
            self.items.swap(idx, parent);
            idx = parent;
        }
        trace!(weight, position = idx, "heap insert");
    }

    /// Remove and return the minimum-weight item.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.min_heapify(0);
        trace!(weight = min.weight(), remaining = self.items.len(), "heap extract");
        Some(min)
    }

    /// Sift the item at `idx` down until neither child is strictly lighter.
    fn min_heapify(&mut self, mut idx: usize) {
        let n = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < n && self.items[left].weight() < self.items[smallest].weight() {
                smallest = left;
            }
            if right < n && self.items[right].weight() < self.items[smallest].weight() {
                smallest = right;
            }
            if smallest == idx {
                return;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }

    /// Check the heap-order invariant over the whole array.
    pub fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| self.items[(i - 1) / 2].weight() <= self.items[i].weight())
    }
}
