//! Error types for the guarded collections.
//!
//! Every fallible operation in this crate returns [`CollectionError`].
//! There are only two kinds of failure:
//!
//! - [`CollectionError::IndexOutOfBounds`]: a positional [`LinkedList`]
//!   operation addressed a position outside the accepted range
//! - [`CollectionError::EmptyCollection`]: a [`Stack`] or [`Queue`] was asked
//!   for an element while holding none
//!
//! Both are recoverable. A failed operation never leaves a collection
//! partially modified.
//!
//! # Examples
//!
//! ```rust
//! use guarded_collections::Stack;
//!
//! let stack: Stack<i32> = Stack::new();
//! let error = stack.pop().unwrap_err();
//! assert!(error.is_empty_collection());
//! assert_eq!(error.to_string(), "cannot pop on an empty collection");
//! ```
//!
//! [`LinkedList`]: crate::LinkedList
//! [`Stack`]: crate::Stack
//! [`Queue`]: crate::Queue

use thiserror::Error;

/// Convenience alias for results produced by collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

// =============================================================================
// CollectionError
// =============================================================================

/// Errors returned by collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A position fell outside the range accepted by the operation.
    #[error("index out of bounds: the index is {index} but the size is {size}")]
    IndexOutOfBounds {
        /// The position that was requested.
        index: usize,
        /// The size of the collection when the request was rejected.
        size: usize,
    },

    /// An element was requested from a collection holding none.
    #[error("cannot {operation} on an empty collection")]
    EmptyCollection {
        /// The name of the rejected operation (e.g. `"pop"`, `"dequeue"`).
        operation: &'static str,
    },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl CollectionError {
    /// Creates a new `IndexOutOfBounds` error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::CollectionError;
    ///
    /// let error = CollectionError::index_out_of_bounds(7, 3);
    /// assert!(error.is_index_out_of_bounds());
    /// ```
    #[must_use]
    pub const fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a new `EmptyCollection` error for the named operation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::CollectionError;
    ///
    /// let error = CollectionError::empty_collection("dequeue");
    /// assert!(error.is_empty_collection());
    /// ```
    #[must_use]
    pub const fn empty_collection(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }

    /// Returns `true` if this is an `IndexOutOfBounds` error.
    #[must_use]
    pub const fn is_index_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }

    /// Returns `true` if this is an `EmptyCollection` error.
    #[must_use]
    pub const fn is_empty_collection(&self) -> bool {
        matches!(self, Self::EmptyCollection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_index_out_of_bounds_display() {
        let error = CollectionError::index_out_of_bounds(5, 2);
        assert_eq!(
            format!("{error}"),
            "index out of bounds: the index is 5 but the size is 2"
        );
    }

    #[rstest]
    #[case("pop")]
    #[case("peek")]
    #[case("dequeue")]
    #[case("front")]
    fn test_empty_collection_display(#[case] operation: &'static str) {
        let error = CollectionError::empty_collection(operation);
        assert_eq!(
            format!("{error}"),
            format!("cannot {operation} on an empty collection")
        );
    }

    #[rstest]
    fn test_predicates_are_exclusive() {
        let index_error = CollectionError::index_out_of_bounds(0, 0);
        let empty_error = CollectionError::empty_collection("pop");

        assert!(index_error.is_index_out_of_bounds());
        assert!(!index_error.is_empty_collection());
        assert!(empty_error.is_empty_collection());
        assert!(!empty_error.is_index_out_of_bounds());
    }

    #[rstest]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&CollectionError::empty_collection("pop"));
    }
}
