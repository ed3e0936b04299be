//! Thread-safe LIFO stack.
//!
//! [`Stack`] keeps its elements in a `Vec` whose end is the top of the
//! stack. Elements are pushed onto and popped from the top only.
//!
//! # Examples
//!
//! ```rust
//! use guarded_collections::Stack;
//!
//! let stack = Stack::new();
//! stack.push(1);
//! stack.push(2);
//! stack.push(3);
//!
//! assert_eq!(stack.peek(), Ok(3));
//! assert_eq!(stack.pop(), Ok(3));
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.size(), 1);
//! ```

use std::fmt;
use std::iter::FromIterator;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{CollectionError, Result};

/// A thread-safe last-in, first-out stack.
///
/// # Time Complexity
///
/// | Operation  | Complexity     |
/// |------------|----------------|
/// | `push`     | O(1) amortized |
/// | `pop`      | O(1)           |
/// | `peek`     | O(1)           |
/// | `size`     | O(1)           |
/// | `is_empty` | O(1)           |
pub struct Stack<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Stack<T> {
    /// Creates a new empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates a new empty stack with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Pushes an element onto the top of the stack.
    pub fn push(&self, value: T) {
        let mut items = self.items.write();
        items.push(value);
        trace!(operation = "push", size = items.len(), "stack mutated");
    }

    /// Removes the top element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the stack is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Stack;
    ///
    /// let stack: Stack<i32> = [1, 2].into_iter().collect();
    /// assert_eq!(stack.pop(), Ok(2));
    /// assert_eq!(stack.pop(), Ok(1));
    /// assert!(stack.pop().unwrap_err().is_empty_collection());
    /// ```
    pub fn pop(&self) -> Result<T> {
        let mut items = self.items.write();
        let Some(value) = items.pop() else {
            debug!(operation = "pop", "stack is empty");
            return Err(CollectionError::empty_collection("pop"));
        };
        trace!(operation = "pop", size = items.len(), "stack mutated");
        Ok(value)
    }

    /// Returns `true` if the stack holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the number of elements on the stack.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.read().len()
    }

    /// Pushes every element of `iter` under a single write lock, in order.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let mut items = self.items.write();
        let before = items.len();
        items.extend(iter);
        trace!(
            operation = "extend",
            added = items.len() - before,
            size = items.len(),
            "stack mutated"
        );
    }
}

impl<T: Clone> Stack<T> {
    /// Returns a copy of the top element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the stack is empty.
    pub fn peek(&self) -> Result<T> {
        self.items
            .read()
            .last()
            .cloned()
            .ok_or(CollectionError::empty_collection("peek"))
    }

    /// Returns a snapshot of the elements from bottom to top.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Stack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes the elements in iteration order; the last one ends up on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Self {
            items: RwLock::new(self.to_vec()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.items.read().iter()).finish()
    }
}

static_assertions::assert_impl_all!(Stack<i32>: Send, Sync);
