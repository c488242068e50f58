//! Argument packing primitives.
//!
//! This module provides [`ArgumentPack`], an immutable bundle of positional
//! and keyword arguments, and [`ArgumentKey`], a typed address into such a
//! bundle.
//!
//! # Overview
//!
//! - [`ArgumentPack`]: positional `Vec` plus keyword `BTreeMap`
//! - [`ArgumentKey`]: a position or a keyword name, with an optional default
//! - [`ArgumentKeys`]: an ordered key collection split on demand
//! - [`unpackly`]: adapts a two-part function to take a whole pack
//!
//! # Examples
//!
//! ```rust
//! use actkit::arguments::{ArgumentKey, ArgumentPack};
//!
//! let base = ArgumentPack::positional([1, 2]);
//! let extended = base.expand_with([3], [("step".to_string(), 1)]);
//!
//! assert_eq!(extended.args(), &[1, 2, 3]);
//! assert_eq!(base.args(), &[1, 2]); // the original is untouched
//!
//! let keywords_only = extended.without(&[
//!     ArgumentKey::position(0),
//!     ArgumentKey::position(1),
//!     ArgumentKey::position(2),
//! ]);
//! assert_eq!(keywords_only.args().len(), 0);
//! assert_eq!(keywords_only["step"], 1);
//! ```

mod error;
mod key;
mod pack;

pub use error::ArgumentError;
pub use key::{ArgumentKey, ArgumentKeys, KeyValue};
pub use pack::ArgumentPack;

use std::collections::BTreeMap;

/// Packs positional and keyword arguments, reusing a lone pack as is.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::{ArgumentPack, as_arguments};
///
/// let pack = ArgumentPack::positional([1, 2]);
/// assert_eq!(as_arguments(pack.clone()), pack);
/// ```
pub fn as_arguments<P>(arguments: P) -> ArgumentPack<P::Item>
where
    P: Into<ArgumentPack<P::Item>> + IntoArgumentPack,
{
    arguments.into()
}

/// Types that [`as_arguments`] accepts.
pub trait IntoArgumentPack {
    /// The argument type of the resulting pack.
    type Item;
}

impl<T> IntoArgumentPack for ArgumentPack<T> {
    type Item = T;
}

impl<T> IntoArgumentPack for Vec<T> {
    type Item = T;
}

/// Adapts `function` to take its arguments as a single pack.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::{ArgumentPack, unpackly};
///
/// let sum = unpackly(|args: &[i32], _kwargs| args.iter().sum::<i32>());
/// assert_eq!(sum(&ArgumentPack::positional([1, 2, 3])), 6);
/// ```
pub fn unpackly<T, R, F>(function: F) -> impl Fn(&ArgumentPack<T>) -> R
where
    F: Fn(&[T], &BTreeMap<String, T>) -> R,
{
    move |arguments| arguments.call(&function)
}
