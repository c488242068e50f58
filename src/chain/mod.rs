//! Action chains and context threading.
//!
//! This module provides the collaborators the cursor engine records its
//! deferred computation into:
//!
//! - [`ActionChain`]: a persistent sequence of fallible `T -> T` steps
//! - [`Contextual`]: a value carried together with a side context
//! - [`saving_context`], [`reading`], [`writing`] and [`considering_context`]:
//!   lift plain transformations into steps over [`Contextual`] values
//!
//! # Examples
//!
//! ```rust
//! use actkit::chain::{ActionChain, Contextual, reading, saving_context};
//!
//! type Root = Contextual<i32, i32>;
//!
//! let chain: ActionChain<Root, ()> = ActionChain::new()
//!     .then(reading(|_, offset: &i32| Ok(*offset)))
//!     .then(saving_context(|value: i32| Ok(value * 2)));
//!
//! assert_eq!(chain.call(Contextual::new(0, 21)).unwrap().into_value(), 42);
//! ```

mod action_chain;
mod contextual;

pub use action_chain::ActionChain;
pub use contextual::{
    Contextual, ContextualNode, considering_context, reading, saving_context, writing,
};
