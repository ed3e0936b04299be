//! Hasher selection for [`Set`](crate::Set).
//!
//! The default hash builder is chosen at compile time:
//!
//! - `fxhash` feature: [`rustc_hash::FxBuildHasher`]
//! - `ahash` feature: [`ahash::RandomState`]
//! - neither: [`std::collections::hash_map::RandomState`]
//!
//! `fxhash` takes precedence when both features are enabled.

/// The hash builder used by [`Set`](crate::Set) unless another is supplied.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The hash builder used by [`Set`](crate::Set) unless another is supplied.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The hash builder used by [`Set`](crate::Set) unless another is supplied.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
