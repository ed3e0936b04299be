//! Thread-safe hash set with algebraic operations.
//!
//! This module provides [`Set`], a hash-based membership collection guarded
//! by a reader/writer lock, along with the binary set operations
//! [`union`](Set::union), [`intersection`](Set::intersection),
//! [`difference`](Set::difference) and [`subset`](Set::subset).
//!
//! # Overview
//!
//! - Insertion is idempotent: a value is stored at most once
//! - Membership is decided by `Hash` + `Eq`; there is no ordering
//! - Binary operations never mutate their operands and always return a
//!   newly built set
//!
//! # Examples
//!
//! ```rust
//! use guarded_collections::Set;
//!
//! let first: Set<i32> = [0, 1, 2].into_iter().collect();
//! let second: Set<i32> = [1, 2, 3].into_iter().collect();
//!
//! assert_eq!(first.union(&second).size(), 4);
//! assert_eq!(first.intersection(&second).size(), 2);
//! assert!(first.difference(&second).has(&0));
//! assert!(!first.subset(&second));
//!
//! // Operands are left untouched
//! assert_eq!(first.size(), 3);
//! assert_eq!(second.size(), 3);
//! ```
//!
//! # Locking
//!
//! Binary operations read-lock both operands for their whole duration.
//! The two locks are always taken in ascending address order, so
//! `a.union(&b)` and `b.union(&a)` running concurrently cannot deadlock
//! even while writers are queued on either set. Passing the same set as
//! both operands is supported and takes the lock once.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;
use std::ptr;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::trace;

use crate::hash::DefaultHashBuilder;

type Members<T, S> = HashSet<T, S>;

/// A thread-safe hash set.
///
/// # Type Parameters
///
/// * `T` - The element type, compared by `Hash` + `Eq`
/// * `S` - The hash builder (defaults to [`DefaultHashBuilder`])
///
/// # Time Complexity
///
/// | Operation      | Complexity         |
/// |----------------|--------------------|
/// | `add`          | O(1) amortized     |
/// | `delete`       | O(1) amortized     |
/// | `has`          | O(1) amortized     |
/// | `items`        | O(n)               |
/// | `union`        | O(n + m)           |
/// | `intersection` | O(min(n, m))       |
/// | `difference`   | O(n)               |
/// | `subset`       | O(n)               |
pub struct Set<T, S = DefaultHashBuilder> {
    members: RwLock<Members<T, S>>,
}

impl<T> Set<T> {
    /// Creates a new empty set with the default hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let set: Set<i32> = Set::new();
    /// assert_eq!(set.size(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new empty set with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> Set<T, S> {
    /// Creates a new empty set using `hasher` to hash elements.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            members: RwLock::new(HashSet::with_hasher(hasher)),
        }
    }

    /// Creates a new empty set with room for `capacity` elements, using
    /// `hasher` to hash elements.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            members: RwLock::new(HashSet::with_capacity_and_hasher(capacity, hasher)),
        }
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.read().len()
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Removes every element. The set stays usable afterwards.
    pub fn clear(&self) {
        self.members.write().clear();
        trace!(operation = "clear", size = 0, "set mutated");
    }

    /// Read-locks `self` and `other` in ascending address order.
    ///
    /// Callers must rule out `self` and `other` being the same set first.
    fn read_pair<'a>(
        &'a self,
        other: &'a Self,
    ) -> (
        RwLockReadGuard<'a, Members<T, S>>,
        RwLockReadGuard<'a, Members<T, S>>,
    ) {
        if ptr::from_ref(self) < ptr::from_ref(other) {
            let left = self.members.read();
            let right = other.members.read();
            (left, right)
        } else {
            let right = other.members.read();
            let left = self.members.read();
            (left, right)
        }
    }
}

impl<T: Hash + Eq, S: BuildHasher> Set<T, S> {
    /// Adds a value if it is not already present, and returns the set so
    /// calls can be chained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let set = Set::new();
    /// set.add(1).add(2).add(1);
    /// assert_eq!(set.size(), 2);
    /// ```
    pub fn add(&self, value: T) -> &Self {
        let mut members = self.members.write();
        if members.insert(value) {
            trace!(operation = "add", size = members.len(), "set mutated");
        }
        self
    }

    /// Removes a value and returns whether it had been present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let set: Set<String> = ["a".to_string()].into_iter().collect();
    /// assert!(set.delete("a"));
    /// assert!(!set.delete("a"));
    /// ```
    pub fn delete<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut members = self.members.write();
        let removed = members.remove(value);
        if removed {
            trace!(operation = "delete", size = members.len(), "set mutated");
        }
        removed
    }

    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn has<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.read().contains(value)
    }

    /// Adds every element of `iter` under a single write lock.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let mut members = self.members.write();
        members.extend(iter);
        trace!(operation = "extend", size = members.len(), "set mutated");
    }

    /// Returns `true` if every element of `self` is also in `other`.
    ///
    /// The empty set is a subset of every set, and every set is a subset of
    /// itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let small: Set<i32> = [0, 1].into_iter().collect();
    /// let large: Set<i32> = [0, 1, 2].into_iter().collect();
    ///
    /// assert!(small.subset(&large));
    /// assert!(small.subset(&small));
    /// assert!(!large.subset(&small));
    /// assert!(Set::<i32>::new().subset(&small));
    /// ```
    #[must_use]
    pub fn subset(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let (left, right) = self.read_pair(other);
        left.len() <= right.len() && left.iter().all(|element| right.contains(element))
    }

    /// Returns `true` if every element of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.subset(self)
    }

    /// Returns `true` if `self` and `other` share no element.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return self.is_empty();
        }
        let (left, right) = self.read_pair(other);
        let (smaller, larger) = if left.len() <= right.len() {
            (&left, &right)
        } else {
            (&right, &left)
        };
        !smaller.iter().any(|element| larger.contains(element))
    }
}

impl<T: Clone, S> Set<T, S> {
    /// Returns a snapshot of the elements in unspecified order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.members.read().iter().cloned().collect()
    }
}

// =============================================================================
// Algebraic Operations
// =============================================================================

impl<T: Hash + Eq + Clone, S: BuildHasher + Clone> Set<T, S> {
    /// Returns a new set with every element found in `self`, `other`, or
    /// both.
    ///
    /// The result uses `self`'s hash builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let first: Set<i32> = (0..3).collect();
    /// let second: Set<i32> = (3..5).collect();
    ///
    /// let union = first.union(&second);
    /// assert_eq!(union.size(), 5);
    /// assert_eq!(first.size(), 3);
    /// assert_eq!(second.size(), 2);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if ptr::eq(self, other) {
            return self.clone();
        }
        let (left, right) = self.read_pair(other);
        let mut result =
            HashSet::with_capacity_and_hasher(left.len() + right.len(), left.hasher().clone());
        result.extend(left.iter().cloned());
        result.extend(right.iter().cloned());
        Self::from_members(result)
    }

    /// Returns a new set with the elements found in both `self` and `other`.
    ///
    /// The smaller operand is iterated and probed against the larger one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let first: Set<i32> = (0..3).collect();
    /// let second: Set<i32> = (0..2).collect();
    ///
    /// let intersection = first.intersection(&second);
    /// assert_eq!(intersection.size(), 2);
    /// assert!(intersection.has(&0) && intersection.has(&1));
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if ptr::eq(self, other) {
            return self.clone();
        }
        let (left, right) = self.read_pair(other);
        let (smaller, larger) = if left.len() <= right.len() {
            (&left, &right)
        } else {
            (&right, &left)
        };
        let mut result = HashSet::with_hasher(left.hasher().clone());
        result.extend(
            smaller
                .iter()
                .filter(|element| larger.contains(*element))
                .cloned(),
        );
        Self::from_members(result)
    }

    /// Returns a new set with the elements of `self` that are not in
    /// `other`.
    ///
    /// Difference is not symmetric: `a.difference(&b)` and
    /// `b.difference(&a)` generally differ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::Set;
    ///
    /// let first: Set<i32> = (0..3).collect();
    /// let second: Set<i32> = (0..2).collect();
    ///
    /// assert_eq!(first.difference(&second).items(), vec![2]);
    /// assert!(second.difference(&first).is_empty());
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if ptr::eq(self, other) {
            return Self::with_hasher(self.members.read().hasher().clone());
        }
        let (left, right) = self.read_pair(other);
        let mut result = HashSet::with_hasher(left.hasher().clone());
        result.extend(
            left.iter()
                .filter(|element| !right.contains(*element))
                .cloned(),
        );
        Self::from_members(result)
    }

    /// Returns a new set with the elements found in exactly one of `self`
    /// and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        if ptr::eq(self, other) {
            return Self::with_hasher(self.members.read().hasher().clone());
        }
        let (left, right) = self.read_pair(other);
        let mut result = HashSet::with_hasher(left.hasher().clone());
        result.extend(
            left.iter()
                .filter(|element| !right.contains(*element))
                .cloned(),
        );
        result.extend(
            right
                .iter()
                .filter(|element| !left.contains(*element))
                .cloned(),
        );
        Self::from_members(result)
    }

    fn from_members(members: Members<T, S>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, S: Default> Default for Set<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Hash + Eq, S: BuildHasher + Default> FromIterator<T> for Set<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<T: Clone, S: Clone> Clone for Set<T, S> {
    fn clone(&self) -> Self {
        Self {
            members: RwLock::new(self.members.read().clone()),
        }
    }
}

/// Two sets are equal when they hold the same elements.
impl<T: Hash + Eq, S: BuildHasher> PartialEq for Set<T, S> {
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let (left, right) = self.read_pair(other);
        *left == *right
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for Set<T, S> {}

impl<T: fmt::Debug, S> fmt::Debug for Set<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.members.read().iter()).finish()
    }
}

static_assertions::assert_impl_all!(Set<i32>: Send, Sync);
static_assertions::assert_impl_all!(Set<String>: Send, Sync);
