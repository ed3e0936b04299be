//! Thread-safe FIFO queue.
//!
//! [`Queue`] appends at the back and removes from the front. The backing
//! store is a `VecDeque`, so dequeuing does not shift the remaining
//! elements.
//!
//! # Examples
//!
//! ```rust
//! use guarded_collections::Queue;
//!
//! let queue = Queue::new();
//! queue.enqueue("first");
//! queue.enqueue("second");
//!
//! assert_eq!(queue.front(), Ok("first"));
//! assert_eq!(queue.dequeue(), Ok("first"));
//! assert_eq!(queue.dequeue(), Ok("second"));
//! assert!(queue.is_empty());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{CollectionError, Result};

/// A thread-safe first-in, first-out queue.
///
/// # Time Complexity
///
/// | Operation  | Complexity     |
/// |------------|----------------|
/// | `enqueue`  | O(1) amortized |
/// | `dequeue`  | O(1)           |
/// | `front`    | O(1)           |
/// | `size`     | O(1)           |
/// | `is_empty` | O(1)           |
pub struct Queue<T> {
    items: RwLock<VecDeque<T>>,
}

impl<T> Queue<T> {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(VecDeque::new()),
        }
    }

    /// Creates a new empty queue with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Adds an element at the back of the queue.
    pub fn enqueue(&self, value: T) {
        let mut items = self.items.write();
        items.push_back(value);
        trace!(operation = "enqueue", size = items.len(), "queue mutated");
    }

    /// Removes the element at the front of the queue and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Queue;
    ///
    /// let queue: Queue<i32> = (1..=2).collect();
    /// assert_eq!(queue.dequeue(), Ok(1));
    /// assert_eq!(queue.dequeue(), Ok(2));
    /// assert!(queue.dequeue().is_err());
    /// ```
    pub fn dequeue(&self) -> Result<T> {
        let mut items = self.items.write();
        let Some(value) = items.pop_front() else {
            debug!(operation = "dequeue", "queue is empty");
            return Err(CollectionError::empty_collection("dequeue"));
        };
        trace!(operation = "dequeue", size = items.len(), "queue mutated");
        Ok(value)
    }

    /// Returns `true` if the queue holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.read().len()
    }

    /// Enqueues every element of `iter` under a single write lock, in order.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let mut items = self.items.write();
        let before = items.len();
        items.extend(iter);
        trace!(
            operation = "extend",
            added = items.len() - before,
            size = items.len(),
            "queue mutated"
        );
    }
}

impl<T: Clone> Queue<T> {
    /// Returns a copy of the front element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the queue is empty.
    pub fn front(&self) -> Result<T> {
        self.items
            .read()
            .front()
            .cloned()
            .ok_or(CollectionError::empty_collection("front"))
    }

    /// Returns a snapshot of the elements from front to back.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().iter().cloned().collect()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Queue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            items: RwLock::new(self.items.read().clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.items.read().iter()).finish()
    }
}

static_assertions::assert_impl_all!(Queue<i32>: Send, Sync);
