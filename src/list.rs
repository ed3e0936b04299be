//! Thread-safe singly-linked list.
//!
//! This module provides [`LinkedList`], a chain of exclusively owned nodes
//! guarded by a single reader/writer lock.
//!
//! # Overview
//!
//! - O(1) head access
//! - O(n) append, positional insert and removal
//! - O(n) search by value
//! - O(n) size (recounted by traversal on every call)
//!
//! Every node is owned by its predecessor (or by the list, for the head),
//! so there is no shared ownership and dropping the list frees the whole
//! chain.
//!
//! # Examples
//!
//! ```rust
//! use guarded_collections::LinkedList;
//!
//! let list = LinkedList::new();
//! list.append(1);
//! list.append(2);
//! list.append(4);
//! list.insert(2, 3).unwrap();
//!
//! assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(list.index_of(&3), Some(2));
//! assert_eq!(list.remove_at(0), Ok(1));
//! assert_eq!(list.to_string(), "2 3 4");
//! ```
//!
//! # Locking
//!
//! ```text
//! append / insert / remove_at / extend   -> exclusive (write) lock
//! index_of / size / is_empty / head / Display / Debug / to_vec -> shared (read) lock
//! ```
//!
//! Shared acquisitions are recursive: a thread holding a [`NodeRef`] can
//! keep calling queries on the same list even while a writer is waiting.

use std::fmt;
use std::iter::FromIterator;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::{debug, trace};

use crate::error::{CollectionError, Result};

type Link<T> = Option<Box<Node<T>>>;

/// A single storage unit of a [`LinkedList`].
///
/// A node holds one element and owns the rest of the chain. Nodes are only
/// reachable through [`LinkedList::head`], which hands out a read-only view.
pub struct Node<T> {
    content: T,
    next: Link<T>,
}

impl<T> Node<T> {
    /// Returns a reference to the element stored in this node.
    #[inline]
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Returns the following node, or `None` at the end of the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = (1..=3).collect();
    /// let head = list.head().unwrap();
    /// let second = head.next().unwrap();
    /// assert_eq!(*second.content(), 2);
    /// assert!(second.next().unwrap().next().is_none());
    /// ```
    #[inline]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// A shared, read-locked view of the head node of a [`LinkedList`].
///
/// The list stays read-locked while this guard is alive, so writers block
/// until it is dropped. Queries on the same list remain callable from the
/// holding thread. Calling a mutator from that thread deadlocks.
pub type NodeRef<'a, T> = MappedRwLockReadGuard<'a, Node<T>>;

/// Lock-protected state of a [`LinkedList`].
struct Chain<T> {
    head: Link<T>,
    /// Number of nodes, maintained by every mutation.
    size: usize,
}

impl<T> Chain<T> {
    const fn new() -> Self {
        Self {
            head: None,
            size: 0,
        }
    }

    /// Builds a chain from a Vec, consuming elements from the end.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let size = elements.len();
        let mut head: Link<T> = None;
        while let Some(content) = elements.pop() {
            head = Some(Box::new(Node {
                content,
                next: head,
            }));
        }
        Self { head, size }
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
        }
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        // Unlink one node at a time; the default recursive drop overflows
        // the stack on long chains.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Walks `steps` links from `link` and returns the link found there.
///
/// Returns `None` if the chain ends before `steps` links were followed.
fn link_at<T>(mut link: &mut Link<T>, steps: usize) -> Option<&mut Link<T>> {
    for _ in 0..steps {
        match link {
            Some(node) => link = &mut node.next,
            None => return None,
        }
    }
    Some(link)
}

/// Walks to the empty link after the last node.
fn tail_link<T>(mut link: &mut Link<T>) -> &mut Link<T> {
    while let Some(node) = link {
        link = &mut node.next;
    }
    link
}

struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            &node.content
        })
    }
}

/// A thread-safe singly-linked list.
///
/// All methods take `&self`; a per-instance [`RwLock`] serializes mutators
/// and admits concurrent readers. Share an instance between threads with
/// [`std::sync::Arc`].
///
/// # Time Complexity
///
/// | Operation   | Complexity |
/// |-------------|------------|
/// | `append`    | O(n)       |
/// | `insert`    | O(index)   |
/// | `remove_at` | O(index)   |
/// | `index_of`  | O(n)       |
/// | `size`      | O(n)       |
/// | `is_empty`  | O(1)       |
/// | `head`      | O(1)       |
///
/// # Examples
///
/// ```rust
/// use guarded_collections::LinkedList;
/// use std::sync::Arc;
/// use std::thread;
///
/// let list = Arc::new(LinkedList::new());
/// let handles: Vec<_> = (0..4)
///     .map(|value| {
///         let list = Arc::clone(&list);
///         thread::spawn(move || list.append(value))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(list.size(), 4);
/// ```
pub struct LinkedList<T> {
    chain: RwLock<Chain<T>>,
}

impl<T> LinkedList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = LinkedList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.size(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: RwLock::new(Chain::new()),
        }
    }

    /// Appends an element to the end of the list.
    ///
    /// The new node becomes the head if the list is empty; otherwise the
    /// chain is walked to the current tail and the node is linked after it.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list = LinkedList::new();
    /// list.append("a");
    /// list.append("b");
    /// assert_eq!(list.to_vec(), vec!["a", "b"]);
    /// ```
    pub fn append(&self, value: T) {
        let mut guard = self.chain.write();
        let chain = &mut *guard;
        *tail_link(&mut chain.head) = Some(Box::new(Node {
            content: value,
            next: None,
        }));
        chain.size += 1;
        trace!(operation = "append", size = chain.size, "linked list mutated");
    }

    /// Inserts an element so that it occupies position `index` afterwards.
    ///
    /// Inserting at `0` makes the element the new head; inserting at
    /// [`size`](Self::size) is equivalent to [`append`](Self::append).
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index > size`.
    /// The list is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = [1, 2, 3, 4].into_iter().collect();
    /// list.insert(2, 5).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 5, 3, 4]);
    /// assert_eq!(list.index_of(&5), Some(2));
    ///
    /// assert!(list.insert(9, 0).is_err());
    /// assert_eq!(list.size(), 5);
    /// ```
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        let mut guard = self.chain.write();
        let chain = &mut *guard;
        let size = chain.size;
        let target = if index <= size {
            link_at(&mut chain.head, index)
        } else {
            None
        };
        let Some(link) = target else {
            debug!(operation = "insert", index, size, "index out of bounds");
            return Err(CollectionError::index_out_of_bounds(index, size));
        };
        let next = link.take();
        *link = Some(Box::new(Node {
            content: value,
            next,
        }));
        chain.size += 1;
        trace!(operation = "insert", index, size = chain.size, "linked list mutated");
        Ok(())
    }

    /// Removes the element at position `index` and returns it.
    ///
    /// The predecessor of the removed node is relinked to its successor.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index > size`, or
    /// if `index == size` (a position that holds no element). The list is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = (1..=4).collect();
    /// assert_eq!(list.remove_at(1), Ok(2));
    /// assert_eq!(list.to_vec(), vec![1, 3, 4]);
    ///
    /// assert!(list.remove_at(3).is_err());
    /// assert_eq!(list.size(), 3);
    /// ```
    pub fn remove_at(&self, index: usize) -> Result<T> {
        let mut guard = self.chain.write();
        let chain = &mut *guard;
        let size = chain.size;
        // `index == size` passes the bound but finds no node to unlink.
        let removed = if index <= size {
            link_at(&mut chain.head, index).and_then(|link| {
                let node = link.take()?;
                let Node { content, next } = *node;
                *link = next;
                Some(content)
            })
        } else {
            None
        };
        let Some(content) = removed else {
            debug!(operation = "remove_at", index, size, "index out of bounds");
            return Err(CollectionError::index_out_of_bounds(index, size));
        };
        chain.size -= 1;
        trace!(operation = "remove_at", index, size = chain.size, "linked list mutated");
        Ok(content)
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.read_recursive().head.is_none()
    }

    /// Returns the number of elements, counted by walking the chain.
    ///
    /// The count is computed independently of the counter maintained by
    /// mutations (see [`cached_size`](Self::cached_size)).
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn size(&self) -> usize {
        self.chain.read_recursive().iter().count()
    }

    /// Returns the element counter maintained by mutations.
    ///
    /// Under the list's invariant this equals [`size`](Self::size); the two
    /// are read under separate lock acquisitions and can differ if another
    /// thread mutates the list in between.
    #[must_use]
    pub fn cached_size(&self) -> usize {
        self.chain.read_recursive().size
    }

    /// Returns a read-locked view of the first node, or `None` if the list
    /// is empty.
    ///
    /// The list remains read-locked until the returned guard is dropped.
    /// Writers wait for it, while queries such as [`size`](Self::size) and
    /// [`index_of`](Self::index_of) may still be called from the thread
    /// holding it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = (1..=3).collect();
    /// let mut sum = 0;
    /// if let Some(head) = list.head() {
    ///     let mut node = Some(&*head);
    ///     while let Some(current) = node {
    ///         sum += current.content();
    ///         node = current.next();
    ///     }
    /// }
    /// assert_eq!(sum, 6);
    ///
    /// let empty: LinkedList<i32> = LinkedList::new();
    /// assert!(empty.head().is_none());
    /// ```
    #[must_use]
    pub fn head(&self) -> Option<NodeRef<'_, T>> {
        RwLockReadGuard::try_map(self.chain.read_recursive(), |chain| {
            chain.head.as_deref()
        })
        .ok()
    }

    /// Appends every element of `iter` under a single write lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list = LinkedList::new();
    /// list.append(0);
    /// list.extend(1..=3);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let mut batch = Chain::build_from_vec(iter.into_iter().collect());
        if batch.size == 0 {
            return;
        }

        let mut guard = self.chain.write();
        let chain = &mut *guard;
        let added = batch.size;
        *tail_link(&mut chain.head) = batch.head.take();
        chain.size += added;
        trace!(operation = "extend", added, size = chain.size, "linked list mutated");
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Returns the position of the first element equal to `value`.
    ///
    /// Returns `None` if no element matches, including when the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = [10, 20, 10].into_iter().collect();
    /// assert_eq!(list.index_of(&10), Some(0));
    /// assert_eq!(list.index_of(&20), Some(1));
    /// assert_eq!(list.index_of(&30), None);
    /// ```
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.chain
            .read_recursive()
            .iter()
            .position(|content| content == value)
    }
}

impl<T: Clone> LinkedList<T> {
    /// Returns a snapshot of the elements in list order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.chain.read_recursive().iter().cloned().collect()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for LinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        Self {
            chain: RwLock::new(Chain::build_from_vec(elements)),
        }
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.to_vec().into_iter().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.chain.read_recursive().iter()).finish()
    }
}

/// Renders the elements in list order, separated by single spaces.
impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.chain.read_recursive();
        let mut first = true;
        for content in chain.iter() {
            if first {
                first = false;
            } else {
                write!(formatter, " ")?;
            }
            write!(formatter, "{content}")?;
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(LinkedList<i32>: Send, Sync);
static_assertions::assert_impl_all!(LinkedList<String>: Send, Sync);
static_assertions::assert_not_impl_any!(LinkedList<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
