//! # guarded-collections
//!
//! Generic, thread-safe collection types guarded by a reader/writer lock.
//!
//! ## Overview
//!
//! - [`LinkedList`]: singly-linked chain with positional insert and removal
//! - [`Stack`]: last-in, first-out
//! - [`Queue`]: first-in, first-out
//! - [`Set`]: hash-based membership with union, intersection, difference
//!   and subset
//!
//! Every collection owns one [`parking_lot::RwLock`] guarding all of its
//! state. Mutating operations take the lock exclusively; queries share it.
//! All methods take `&self`, so a collection is shared between threads by
//! wrapping it in [`std::sync::Arc`].
//!
//! ## Feature Flags
//!
//! - `fxhash`: use `rustc_hash::FxBuildHasher` as [`Set`]'s default hasher
//! - `ahash`: use `ahash::RandomState` as [`Set`]'s default hasher
//!
//! ## Example
//!
//! ```rust
//! use guarded_collections::prelude::*;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(Set::new());
//! let handles: Vec<_> = (0..8)
//!     .map(|value| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             set.add(value);
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.size(), 8);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use guarded_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CollectionError;
    pub use crate::list::LinkedList;
    pub use crate::queue::Queue;
    pub use crate::set::Set;
    pub use crate::stack::Stack;
}

pub mod error;
pub mod hash;

mod list;
mod queue;
mod set;
mod stack;

pub use error::{CollectionError, Result};
pub use hash::DefaultHashBuilder;
pub use list::{LinkedList, Node, NodeRef};
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
