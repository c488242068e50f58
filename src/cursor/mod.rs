//! Action cursors - placeholders that record operations and replay them.
//!
//! An [`ActionCursor`] stands for a not-yet-supplied argument. Operators,
//! attribute and item reads, calls and assignments applied to it are recorded
//! as steps of a new cursor instead of being performed. Invoking the cursor
//! binds arguments to its parameters and runs the steps.
//!
//! # Overview
//!
//! - Letter cursors [`a`] .. [`z`] (without `f`) are single-parameter cursors
//!   whose parameters bind positionally in alphabetical order.
//! - [`act`] and [`placeholder`] are empty cursors: the root of free
//!   identifier lookups, list building and tuple packing.
//! - Combining cursors merges their parameters; two different parameters may
//!   not share a priority.
//! - Every cursor renders the expression it records, parenthesized by a fixed
//!   operator precedence table.
//!
//! # Examples
//!
//! ```rust
//! use actkit::cursor::{a, b, x};
//! use actkit::value::Value;
//!
//! let increment = x() + 1;
//! assert_eq!(
//!     increment.call([Value::from(5)]).unwrap().into_value(),
//!     Some(Value::from(6))
//! );
//!
//! let difference = a() - b();
//! assert_eq!(format!("{difference}"), "<action(a, b): a - b>");
//! assert_eq!(
//!     difference.evaluate_with([Value::from(10), Value::from(3)]),
//!     Ok(Value::from(7))
//! );
//! ```

mod action_cursor;
mod binding;
mod error;
mod factory;
pub mod nature;
mod operand;
mod overloads;
mod parameter;

pub use action_cursor::{ActionCursor, Invocation, KEYWORD_UNPACKING_TEMPLATE, PartialCursor};
pub use binding::{Binding, Scope};
pub use error::{CursorError, Error};
pub use factory::{
    PriorityCounter, a, act, action_cursor_by, action_cursor_with_priority, b, c, d, e, g, h, i,
    j, k, l, m, n, o, p, placeholder, priority_of, q, r, s, t, u, v, w, x, y, z,
};
pub use nature::{NatureContext, OperatorModel};
pub use operand::{Operand, Unpacking};
pub use parameter::{Parameter, ParameterSet, Priority};

pub(crate) use action_cursor::Root;
