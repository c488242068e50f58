//! # actkit
//!
//! Functional combinators for Rust: algebraic flags, argument packs and
//! action cursors for building point-free functions from expressions.
//!
//! ## Overview
//!
//! - **Flags**: nominal or value-carrying markers combined with `|`, `-`, `*`
//! - **Arguments**: positional and keyword argument packs with merging and
//!   selection by key
//! - **Chains**: persistent step sequences and context-threading helpers
//! - **Values**: the dynamic value model cursors compute over
//! - **Cursors**: placeholders like `a`, `b`, `x` that record operations and
//!   replay them against arguments later
//!
//! ## Feature Flags
//!
//! - `flag`: Algebraic flags
//! - `arguments`: Argument keys and packs
//! - `chain`: Contextual values and action chains
//! - `value`: Dynamic values and their operators
//! - `cursor`: Action cursors and their factory
//! - `serde`: Serialization of argument keys and packs
//! - `fxhash`: Faster hashing of cursor bindings
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use actkit::prelude::*;
//!
//! let expression = (a() + b()) * c();
//!
//! assert_eq!(format!("{expression}"), "<action(a, b, c): (a + b) * c>");
//! assert_eq!(
//!     expression.evaluate_with([Value::from(1), Value::from(2), Value::from(3)]),
//!     Ok(Value::from(9))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the contents of every enabled module.
///
/// # Usage
///
/// ```rust
/// use actkit::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "flag")]
    pub use crate::flag::*;

    #[cfg(feature = "arguments")]
    pub use crate::arguments::*;

    #[cfg(feature = "chain")]
    pub use crate::chain::*;

    #[cfg(feature = "value")]
    pub use crate::value::*;

    #[cfg(feature = "cursor")]
    pub use crate::cursor::*;
}

#[cfg(feature = "flag")]
pub mod flag;

#[cfg(feature = "arguments")]
pub mod arguments;

#[cfg(feature = "chain")]
pub mod chain;

#[cfg(feature = "value")]
pub mod value;

#[cfg(feature = "cursor")]
pub mod cursor;
